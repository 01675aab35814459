//! Reference-counted visibility aggregation.
//!
//! - [`VisibilityCounter`] is the ground truth: how many contributions see each cell
//! - [`ObserverTracker`] remembers the last tile list of every mobile observer
//! - [`EyeballTracker`] remembers the tile list of every fixed eyeball source
//! - [`VisibilityMap`] composes them and is the only public entry point that mutates
mod counter;
mod error;
mod eyeballs;
mod map;
mod observers;
#[cfg(feature = "serde")]
mod snapshot;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use counter::VisibilityCounter;
pub use error::VisibilityError;
pub use eyeballs::EyeballTracker;
pub use map::VisibilityMap;
pub use observers::ObserverTracker;
#[cfg(feature = "serde")]
pub use snapshot::VisibilitySnapshot;
