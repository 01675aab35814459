//! Traits describing the world the visibility map is embedded in.
//!
//! The core does not compute line of sight, does not own creatures, and does
//! not render. Those concerns are reached through small traits:
//! - [`VisionOracle`] answers "which cells does this vision rule see from here"
//! - [`ObserverOracle`] finds the observer standing on a cell and its current view
//! - [`RenderHints`] receives a flag whenever a cell crosses the visible/hidden boundary
//!
//! [`VisibilityEnv`] bundles all three for operations that need the full world.
mod observers;
mod render;
mod vision;

pub use observers::ObserverOracle;
pub use render::{NoRenderHints, RenderHints};
pub use vision::{Vision, VisionFlags, VisionOracle};

/// Everything [`crate::VisibilityMap`] needs to re-derive visibility on its own.
///
/// Implemented automatically for any type that provides all three collaborator
/// traits, so a world type only implements the pieces.
pub trait VisibilityEnv: VisionOracle + ObserverOracle + RenderHints {}

impl<T> VisibilityEnv for T where T: VisionOracle + ObserverOracle + RenderHints + ?Sized {}
