//! Incremental visibility aggregation shared by the runtime and offline tools.
//!
//! `vision-core` keeps a per-cell reference count of how many observers and
//! eyeball sources currently see each grid cell. Contributions are retracted
//! and re-applied as observers move or world geometry changes, and every
//! crossing of the visible/hidden boundary is forwarded to the world as a
//! render-update hint. All mutation flows through [`visibility::VisibilityMap`];
//! the world plugs in through the traits in [`env`].
pub mod config;
pub mod env;
pub mod error;
pub mod state;
pub mod visibility;

pub use config::VisionConfig;
pub use env::{
    NoRenderHints, ObserverOracle, RenderHints, Vision, VisionFlags, VisionOracle, VisibilityEnv,
};
pub use error::{CoreError, ErrorSeverity};
pub use state::{ObserverId, Position};
pub use visibility::{
    EyeballTracker, ObserverTracker, VisibilityCounter, VisibilityError, VisibilityMap,
};

#[cfg(feature = "serde")]
pub use visibility::VisibilitySnapshot;
