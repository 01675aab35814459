use std::collections::HashMap;

use crate::env::RenderHints;
use crate::state::Position;

use super::VisibilityError;

/// Direction of a crossing of the visible/hidden boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    /// Count went from 0 to 1.
    Revealed,
    /// Count went from 1 to 0.
    Concealed,
}

/// Per-cell reference count of overlapping contributions.
///
/// Absence of an entry means a count of zero; entries are dropped as soon as
/// they reach zero so the map only holds visible cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityCounter {
    counts: HashMap<Position, u32>,
}

impl VisibilityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_counts(counts: HashMap<Position, u32>) -> Self {
        Self { counts }
    }

    /// Adds one occurrence per tile. Returns the tiles whose count became
    /// exactly 1, in input order, and hints each of them.
    pub fn add_positions<H>(&mut self, hints: &mut H, tiles: &[Position]) -> Vec<Position>
    where
        H: RenderHints + ?Sized,
    {
        let mut revealed = Vec::new();
        for &position in tiles {
            if self.increment(position).is_some() {
                hints.set_needs_render_update(position, true);
                revealed.push(position);
            }
        }
        revealed
    }

    /// Retracts one occurrence per tile, hinting every tile that drops to 0.
    ///
    /// # Panics
    ///
    /// Panics if any tile is retracted more often than it was added. That is a
    /// bookkeeping bug in the caller, not a runtime condition.
    pub fn remove_positions<H>(&mut self, hints: &mut H, tiles: &[Position])
    where
        H: RenderHints + ?Sized,
    {
        if let Err(err) = self.try_remove_positions(hints, tiles) {
            panic!("visibility invariant violated: {err}");
        }
    }

    /// Checked form of [`Self::remove_positions`].
    ///
    /// The whole batch is validated before anything is decremented, so on
    /// error the counter and the hint sink are untouched.
    pub fn try_remove_positions<H>(
        &mut self,
        hints: &mut H,
        tiles: &[Position],
    ) -> Result<(), VisibilityError>
    where
        H: RenderHints + ?Sized,
    {
        let mut requested: HashMap<Position, u32> = HashMap::with_capacity(tiles.len());
        for &position in tiles {
            *requested.entry(position).or_default() += 1;
        }

        let mut shortfalls: Vec<(Position, u32, u32)> = requested
            .iter()
            .map(|(&position, &requested)| (position, self.count(position), requested))
            .filter(|&(_, count, requested)| count < requested)
            .collect();
        shortfalls.sort_unstable();
        if let Some(&(position, count, requested)) = shortfalls.first() {
            return Err(VisibilityError::CountUnderflow {
                position,
                count,
                requested,
            });
        }

        for &position in tiles {
            if self.decrement(position) == Some(Transition::Concealed) {
                hints.set_needs_render_update(position, true);
            }
        }
        Ok(())
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.count(position) > 0
    }

    pub fn count(&self, position: Position) -> u32 {
        self.counts.get(&position).copied().unwrap_or(0)
    }

    /// Cells with a positive count, in no particular order.
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.counts.keys().copied()
    }

    pub fn counts(&self) -> &HashMap<Position, u32> {
        &self.counts
    }

    /// Number of visible cells.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn increment(&mut self, position: Position) -> Option<Transition> {
        let count = self.counts.entry(position).or_insert(0);
        *count += 1;
        (*count == 1).then_some(Transition::Revealed)
    }

    // Callers validate the count first.
    fn decrement(&mut self, position: Position) -> Option<Transition> {
        let count = self.counts.get_mut(&position)?;
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&position);
            Some(Transition::Concealed)
        } else {
            None
        }
    }
}
