//! Runtime around the visibility engine.
//!
//! Wires a reference grid world into [`vision_core::VisibilityMap`] and
//! exposes the result as a turn-loop facade.
//!
//! Modules are organized by responsibility:
//! - [`world`] holds terrain, creatures and pending render updates
//! - [`fov`] computes ray-cast fields of view over the terrain
//! - [`session`] keeps visibility in step with world changes
//! - [`scenario`] loads RON setups and scripted runs
//! - [`repository`] persists visibility snapshots by turn
pub mod config;
pub mod error;
pub mod fov;
pub mod repository;
pub mod scenario;
pub mod session;
pub mod world;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use fov::RaycastVision;
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SnapshotRepository,
};
pub use scenario::{Placement, Scenario, ScenarioStep};
pub use session::{RenderUpdate, VisionSession};
pub use world::{Creature, GridWorld, MapDimensions, TerrainKind, TerrainMap};
