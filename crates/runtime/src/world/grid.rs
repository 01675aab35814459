use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use vision_core::{ObserverId, ObserverOracle, Position, RenderHints, Vision, VisionOracle};

use crate::error::{Result, RuntimeError};
use crate::fov::RaycastVision;

use super::{MapDimensions, TerrainKind, TerrainMap};

/// A mobile creature that may contribute visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: ObserverId,
    pub position: Position,
    pub vision: Vision,
}

/// Reference world: terrain, creatures and pending render updates.
///
/// Implements every collaborator trait the visibility map needs, so a
/// `&mut GridWorld` can be handed straight to [`vision_core::VisibilityMap`].
#[derive(Clone, Debug)]
pub struct GridWorld {
    terrain: TerrainMap,
    creatures: BTreeMap<ObserverId, Creature>,
    occupancy: HashMap<Position, ObserverId>,
    pending_renders: BTreeSet<Position>,
    next_id: u32,
    vision: RaycastVision,
}

impl GridWorld {
    pub fn new(terrain: TerrainMap) -> Self {
        Self {
            terrain,
            creatures: BTreeMap::new(),
            occupancy: HashMap::new(),
            pending_renders: BTreeSet::new(),
            next_id: ObserverId::PLAYER.0,
            vision: RaycastVision,
        }
    }

    pub fn terrain(&self) -> &TerrainMap {
        &self.terrain
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.terrain.dimensions()
    }

    pub fn creature(&self, id: ObserverId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// Places a new creature and allocates its handle. Handles are never reused.
    pub fn spawn(&mut self, position: Position, vision: Vision) -> Result<ObserverId> {
        self.ensure_in_bounds(position)?;
        self.ensure_vacant(position)?;

        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.creatures.insert(
            id,
            Creature {
                id,
                position,
                vision,
            },
        );
        self.occupancy.insert(position, id);
        Ok(id)
    }

    /// Moves a creature and returns the cell it left.
    pub fn move_creature(&mut self, id: ObserverId, to: Position) -> Result<Position> {
        self.ensure_in_bounds(to)?;
        let from = self
            .creatures
            .get(&id)
            .map(|creature| creature.position)
            .ok_or(RuntimeError::UnknownObserver(id))?;
        if from == to {
            return Ok(from);
        }
        self.ensure_vacant(to)?;

        self.occupancy.remove(&from);
        self.occupancy.insert(to, id);
        if let Some(creature) = self.creatures.get_mut(&id) {
            creature.position = to;
        }
        Ok(from)
    }

    pub fn despawn(&mut self, id: ObserverId) -> Result<Creature> {
        let creature = self
            .creatures
            .remove(&id)
            .ok_or(RuntimeError::UnknownObserver(id))?;
        self.occupancy.remove(&creature.position);
        Ok(creature)
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> Result<TerrainKind> {
        self.terrain.set_terrain(position, terrain)
    }

    /// Largest radius among creatures and `extra`, the reach of a geometry change.
    pub fn max_vision_radius(&self, extra: &Vision) -> u32 {
        self.creatures
            .values()
            .map(|creature| creature.vision.radius)
            .fold(extra.radius, u32::max)
    }

    pub fn needs_render_update(&self, position: Position) -> bool {
        self.pending_renders.contains(&position)
    }

    /// Drains pending render updates in position order.
    pub fn take_render_updates(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.pending_renders).into_iter().collect()
    }

    fn ensure_in_bounds(&self, position: Position) -> Result<()> {
        if self.terrain.contains(position) {
            return Ok(());
        }
        let dimensions = self.terrain.dimensions();
        Err(RuntimeError::OutOfBounds {
            position,
            width: dimensions.width,
            height: dimensions.height,
        })
    }

    fn ensure_vacant(&self, position: Position) -> Result<()> {
        match self.occupancy.get(&position) {
            Some(occupant) => Err(RuntimeError::Occupied {
                position,
                occupant: *occupant,
            }),
            None => Ok(()),
        }
    }
}

impl VisionOracle for GridWorld {
    fn visible_tiles(&self, origin: Position, vision: &Vision) -> Vec<Position> {
        self.vision.visible_tiles(&self.terrain, origin, vision)
    }
}

impl ObserverOracle for GridWorld {
    fn observer_at(&self, position: Position) -> Option<ObserverId> {
        self.occupancy.get(&position).copied()
    }

    fn observer_visible_tiles(&self, observer: ObserverId) -> Vec<Position> {
        match self.creatures.get(&observer) {
            Some(creature) => self.visible_tiles(creature.position, &creature.vision),
            None => Vec::new(),
        }
    }
}

impl RenderHints for GridWorld {
    fn set_needs_render_update(&mut self, position: Position, needs_update: bool) {
        tracing::trace!(%position, needs_update, "render hint");
        if needs_update {
            self.pending_renders.insert(position);
        } else {
            self.pending_renders.remove(&position);
        }
    }
}
