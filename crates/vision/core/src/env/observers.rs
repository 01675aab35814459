use crate::state::{ObserverId, Position};

/// Read-only access to the world's observers.
pub trait ObserverOracle {
    /// Returns the observer occupying `position`, if any.
    fn observer_at(&self, position: Position) -> Option<ObserverId>;

    /// Returns the cells the observer currently sees with its own vision.
    fn observer_visible_tiles(&self, observer: ObserverId) -> Vec<Position>;
}
