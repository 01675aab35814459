//! Persistence for visibility snapshots.
//!
//! Snapshots are indexed by turn so a session can roll back to any saved
//! point. Terrain and creatures are owned by the world and are not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
