use std::collections::HashMap;

use crate::env::{RenderHints, Vision, VisionOracle};
use crate::state::Position;

use super::VisibilityCounter;

/// Tile lists contributed by fixed, anonymous eyeball sources.
///
/// Sources are keyed by the cell they sit on and all share one vision rule,
/// so unlike [`super::ObserverTracker`] nothing per-source is stored beyond
/// the last contribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EyeballTracker {
    contributions: HashMap<Position, Vec<Position>>,
}

impl EyeballTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_contributions(contributions: HashMap<Position, Vec<Position>>) -> Self {
        Self { contributions }
    }

    /// Retracts the source at `position` (if any), recomputes its view with
    /// `vision`, then records and applies the new view.
    pub fn update<E>(
        &mut self,
        counter: &mut VisibilityCounter,
        env: &mut E,
        vision: &Vision,
        position: Position,
    ) where
        E: VisionOracle + RenderHints + ?Sized,
    {
        self.remove(counter, env, position);
        let tiles = env.visible_tiles(position, vision);
        let recorded = self.contributions.entry(position).or_insert(tiles);
        counter.add_positions(env, recorded);
    }

    /// Retracts the source at `position` and forgets it. Absent sources are
    /// ignored.
    pub fn remove<H>(&mut self, counter: &mut VisibilityCounter, hints: &mut H, position: Position)
    where
        H: RenderHints + ?Sized,
    {
        if let Some(tiles) = self.contributions.remove(&position) {
            counter.remove_positions(hints, &tiles);
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.contributions.contains_key(&position)
    }

    pub fn tiles(&self, position: Position) -> Option<&[Position]> {
        self.contributions.get(&position).map(Vec::as_slice)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.contributions.keys().copied()
    }

    pub fn contributions(&self) -> &HashMap<Position, Vec<Position>> {
        &self.contributions
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
