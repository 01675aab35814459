use std::collections::HashMap;

use crate::env::RenderHints;
use crate::state::{ObserverId, Position};

use super::VisibilityCounter;

/// Last tile list each mobile observer contributed to the counter.
///
/// An entry exists iff the observer currently has an active contribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObserverTracker {
    contributions: HashMap<ObserverId, Vec<Position>>,
}

impl ObserverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_contributions(contributions: HashMap<ObserverId, Vec<Position>>) -> Self {
        Self { contributions }
    }

    /// Replaces the observer's contribution with `tiles`.
    ///
    /// The previous contribution is fully retracted before the new one is
    /// applied, even when both lists are identical. A tile seen only by this
    /// observer therefore hints twice (hidden, then visible again).
    ///
    /// Returns the tiles that became visible while applying `tiles`.
    pub fn update<H>(
        &mut self,
        counter: &mut VisibilityCounter,
        hints: &mut H,
        observer: ObserverId,
        tiles: Vec<Position>,
    ) -> Vec<Position>
    where
        H: RenderHints + ?Sized,
    {
        self.remove(counter, hints, observer);
        let recorded = self.contributions.entry(observer).or_insert(tiles);
        counter.add_positions(hints, recorded)
    }

    /// Retracts the observer's contribution and forgets it. Untracked
    /// observers are ignored.
    pub fn remove<H>(&mut self, counter: &mut VisibilityCounter, hints: &mut H, observer: ObserverId)
    where
        H: RenderHints + ?Sized,
    {
        if let Some(tiles) = self.contributions.remove(&observer) {
            counter.remove_positions(hints, &tiles);
        }
    }

    pub fn contains(&self, observer: ObserverId) -> bool {
        self.contributions.contains_key(&observer)
    }

    pub fn tiles(&self, observer: ObserverId) -> Option<&[Position]> {
        self.contributions.get(&observer).map(Vec::as_slice)
    }

    pub fn observers(&self) -> impl Iterator<Item = ObserverId> + '_ {
        self.contributions.keys().copied()
    }

    pub fn contributions(&self) -> &HashMap<ObserverId, Vec<Position>> {
        &self.contributions
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
