//! Turn-loop facade over a [`GridWorld`] and its [`VisibilityMap`].

use std::collections::BTreeSet;

use tracing::{debug, info};
use vision_core::{
    NoRenderHints, ObserverId, ObserverOracle, Position, RenderHints, Vision, VisionConfig,
    VisibilityMap, VisibilitySnapshot,
};

use crate::error::{Result, RuntimeError};
use crate::repository::SnapshotRepository;
use crate::world::{GridWorld, TerrainKind};

/// Cell whose visibility crossed the visible/hidden boundary since the last
/// drain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderUpdate {
    pub position: Position,
    pub visible: bool,
}

/// Owns a world and keeps its visibility map in step with every change.
///
/// Observers are creatures whose view counts towards visibility. Plain
/// creatures exist in the world but contribute nothing until tracked.
#[derive(Clone, Debug)]
pub struct VisionSession {
    world: GridWorld,
    visibility: VisibilityMap,
    turn: u64,
}

impl VisionSession {
    pub fn new(world: GridWorld, config: VisionConfig) -> Self {
        Self {
            world,
            visibility: VisibilityMap::new(config),
            turn: 0,
        }
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn advance_turn(&mut self) -> u64 {
        self.turn += 1;
        self.turn
    }

    // ===== creatures =====

    /// Spawns a creature and starts tracking its view.
    pub fn spawn_observer(&mut self, position: Position, vision: Vision) -> Result<ObserverId> {
        let id = self.world.spawn(position, vision)?;
        self.start_tracking(id)?;
        info!(observer = %id, %position, radius = vision.radius, "spawned observer");
        Ok(id)
    }

    /// Spawns a creature that does not contribute visibility.
    pub fn spawn_creature(&mut self, position: Position, vision: Vision) -> Result<ObserverId> {
        let id = self.world.spawn(position, vision)?;
        info!(creature = %id, %position, "spawned creature");
        Ok(id)
    }

    /// Applies the creature's current view. Re-tracking refreshes the view.
    pub fn start_tracking(&mut self, id: ObserverId) -> Result<()> {
        if self.world.creature(id).is_none() {
            return Err(RuntimeError::UnknownObserver(id));
        }
        let tiles = self.world.observer_visible_tiles(id);
        let revealed = self.visibility.update(&mut self.world, id, tiles);
        debug!(observer = %id, revealed = revealed.len(), "tracking observer");
        Ok(())
    }

    /// Retracts the creature's view. The creature stays in the world.
    pub fn stop_tracking(&mut self, id: ObserverId) {
        self.visibility.remove(&mut self.world, id);
        debug!(observer = %id, "stopped tracking observer");
    }

    pub fn is_tracking(&self, id: ObserverId) -> bool {
        self.visibility.is_tracking(id)
    }

    /// Moves a creature. A tracked observer's view is recomputed from the new cell.
    pub fn move_creature(&mut self, id: ObserverId, to: Position) -> Result<()> {
        let from = self.world.move_creature(id, to)?;
        if self.visibility.is_tracking(id) {
            let tiles = self.world.observer_visible_tiles(id);
            self.visibility.update(&mut self.world, id, tiles);
        }
        debug!(creature = %id, %from, %to, "moved creature");
        Ok(())
    }

    /// Retracts any contribution, then removes the creature from the world.
    pub fn despawn(&mut self, id: ObserverId) -> Result<()> {
        if self.world.creature(id).is_none() {
            return Err(RuntimeError::UnknownObserver(id));
        }
        self.visibility.remove(&mut self.world, id);
        let creature = self.world.despawn(id)?;
        info!(creature = %id, position = %creature.position, "despawned creature");
        Ok(())
    }

    // ===== eyeballs =====

    pub fn place_eyeball(&mut self, position: Position) -> Result<()> {
        self.ensure_in_bounds(position)?;
        self.visibility.update_eyeball(&mut self.world, position);
        info!(%position, "placed eyeball");
        Ok(())
    }

    /// Removing a cell without an eyeball is a no-op.
    pub fn remove_eyeball(&mut self, position: Position) {
        self.visibility.remove_eyeball(&mut self.world, position);
        debug!(%position, "removed eyeball");
    }

    pub fn has_eyeball(&self, position: Position) -> bool {
        self.visibility.has_eyeball(position)
    }

    // ===== geometry =====

    /// Changes the terrain at `position` and re-derives every contribution
    /// anchored within reach of it. Returns the previous terrain.
    ///
    /// Reach is the largest vision radius in play, measured as a Chebyshev
    /// square, so every source that could see `position` is refreshed.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> Result<TerrainKind> {
        let previous = self.world.set_terrain(position, terrain)?;
        if previous == terrain {
            return Ok(previous);
        }

        let reach = self
            .world
            .max_vision_radius(&self.visibility.config().eyeball_vision);
        let mut refreshed = 0usize;
        for cell in self.world.dimensions().square_around(position, reach) {
            self.visibility.on_visibility_changed(&mut self.world, cell);
            refreshed += 1;
        }

        debug!(%position, %previous, %terrain, reach, refreshed, "terrain changed");
        Ok(previous)
    }

    // ===== queries =====

    pub fn is_visible(&self, position: Position) -> bool {
        self.visibility.is_visible(position)
    }

    /// Visible cells in position order.
    pub fn visible_positions(&self) -> Vec<Position> {
        let mut visible: Vec<Position> = self.visibility.visible_positions().collect();
        visible.sort_unstable();
        visible
    }

    /// Drains pending render updates, tagged with each cell's current state.
    pub fn take_render_updates(&mut self) -> Vec<RenderUpdate> {
        self.world
            .take_render_updates()
            .into_iter()
            .map(|position| RenderUpdate {
                position,
                visible: self.visibility.is_visible(position),
            })
            .collect()
    }

    /// ASCII view of the level. Hidden cells are blank, tracked observers are
    /// `@`, other creatures `c`, eyeballs `*`.
    pub fn render_ascii(&self) -> String {
        let dimensions = self.world.dimensions();
        let mut out = String::with_capacity(dimensions.area() + dimensions.height as usize);
        for y in 0..dimensions.height as i32 {
            for x in 0..dimensions.width as i32 {
                let cell = Position::new(x, y);
                let glyph = if !self.is_visible(cell) {
                    ' '
                } else if let Some(id) = self.world.observer_at(cell) {
                    if self.is_tracking(id) { '@' } else { 'c' }
                } else if self.has_eyeball(cell) {
                    '*'
                } else {
                    self.world.terrain().terrain(cell).glyph()
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    // ===== persistence =====

    pub fn snapshot(&self) -> VisibilitySnapshot {
        self.visibility.snapshot()
    }

    /// Saves the current snapshot under the current turn.
    pub fn save<R>(&self, repo: &R) -> Result<()>
    where
        R: SnapshotRepository + ?Sized,
    {
        let snapshot = self.snapshot();
        repo.save(self.turn, &snapshot)?;
        info!(
            turn = self.turn,
            visible = snapshot.visible_cells(),
            "saved visibility"
        );
        Ok(())
    }

    /// Replaces the visibility map with the snapshot saved for `turn`.
    ///
    /// The snapshot is verified before it is adopted. Observers the world no
    /// longer holds are dropped and surviving observers are re-applied from
    /// where they stand now, so the restored map always matches the world.
    /// Cells whose state differs from the current map are flagged for a
    /// render update.
    pub fn restore<R>(&mut self, repo: &R, turn: u64) -> Result<()>
    where
        R: SnapshotRepository + ?Sized,
    {
        let snapshot = repo.load(turn)?.ok_or(RuntimeError::MissingSnapshot(turn))?;
        let mut restored = VisibilityMap::from_snapshot(*self.visibility.config(), snapshot)?;

        let tracked: Vec<ObserverId> = restored.observers().observers().collect();
        let mut dropped = 0usize;
        for id in tracked {
            if self.world.creature(id).is_some() {
                let tiles = self.world.observer_visible_tiles(id);
                restored.update(&mut NoRenderHints, id, tiles);
            } else {
                restored.remove(&mut NoRenderHints, id);
                dropped += 1;
            }
        }

        let before: BTreeSet<Position> = self.visibility.visible_positions().collect();
        let after: BTreeSet<Position> = restored.visible_positions().collect();
        for position in before.symmetric_difference(&after) {
            self.world.set_needs_render_update(*position, true);
        }

        self.visibility = restored;
        self.turn = turn;
        info!(turn, visible = after.len(), dropped, "restored visibility");
        Ok(())
    }

    fn ensure_in_bounds(&self, position: Position) -> Result<()> {
        let dimensions = self.world.dimensions();
        if dimensions.contains(position) {
            Ok(())
        } else {
            Err(RuntimeError::OutOfBounds {
                position,
                width: dimensions.width,
                height: dimensions.height,
            })
        }
    }
}
