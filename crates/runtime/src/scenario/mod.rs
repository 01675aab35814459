//! RON scenarios: terrain rows, initial placements and a scripted run.
//!
//! Observer handles are allocated in placement order, observers first and
//! plain creatures after them, so steps can refer to them by number.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vision_core::{ObserverId, Position, Vision, VisionFlags};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::session::VisionSession;
use crate::world::{GridWorld, TerrainKind, TerrainMap};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Position,
    /// Falls back to [`RuntimeConfig::default_observer_radius`].
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub see_through_foliage: bool,
}

impl Placement {
    fn vision(&self, config: &RuntimeConfig) -> Vision {
        let vision = Vision::new(self.radius.unwrap_or(config.default_observer_radius));
        if self.see_through_foliage {
            vision.with_flags(VisionFlags::SEE_THROUGH_FOLIAGE)
        } else {
            vision
        }
    }
}

/// One scripted change, applied as its own turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioStep {
    Move { creature: u32, to: Position },
    SetTerrain { at: Position, terrain: TerrainKind },
    PlaceEyeball(Position),
    RemoveEyeball(Position),
    Track(u32),
    Untrack(u32),
    Despawn(u32),
}

impl ScenarioStep {
    pub fn apply(&self, session: &mut VisionSession) -> Result<()> {
        match self {
            ScenarioStep::Move { creature, to } => session.move_creature(ObserverId(*creature), *to),
            ScenarioStep::SetTerrain { at, terrain } => {
                session.set_terrain(*at, *terrain).map(|_| ())
            }
            ScenarioStep::PlaceEyeball(at) => session.place_eyeball(*at),
            ScenarioStep::RemoveEyeball(at) => {
                session.remove_eyeball(*at);
                Ok(())
            }
            ScenarioStep::Track(creature) => session.start_tracking(ObserverId(*creature)),
            ScenarioStep::Untrack(creature) => {
                session.stop_tracking(ObserverId(*creature));
                Ok(())
            }
            ScenarioStep::Despawn(creature) => session.despawn(ObserverId(*creature)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// ASCII terrain, one string per row.
    pub rows: Vec<String>,
    #[serde(default)]
    pub observers: Vec<Placement>,
    #[serde(default)]
    pub creatures: Vec<Placement>,
    #[serde(default)]
    pub eyeballs: Vec<Position>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_ron(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidScenario(format!("failed to parse scenario RON: {e}"))
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidScenario(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_ron(&content)
    }

    /// Builds the world and places everything listed, at turn 0.
    pub fn build(&self, config: &RuntimeConfig) -> Result<VisionSession> {
        let terrain = TerrainMap::from_rows(&self.rows)?;
        let mut session = VisionSession::new(GridWorld::new(terrain), config.vision);

        tracing::info!(
            observers = self.observers.len(),
            creatures = self.creatures.len(),
            eyeballs = self.eyeballs.len(),
            "building scenario"
        );

        for placement in &self.observers {
            session.spawn_observer(placement.position, placement.vision(config))?;
        }
        for placement in &self.creatures {
            session.spawn_creature(placement.position, placement.vision(config))?;
        }
        for eyeball in &self.eyeballs {
            session.place_eyeball(*eyeball)?;
        }
        Ok(session)
    }

    /// Builds the session and applies every step, one turn each.
    ///
    /// `on_turn` sees the session after setup and after every step.
    pub fn run<F>(&self, config: &RuntimeConfig, mut on_turn: F) -> Result<VisionSession>
    where
        F: FnMut(&mut VisionSession) -> Result<()>,
    {
        let mut session = self.build(config)?;
        on_turn(&mut session)?;
        for step in &self.steps {
            session.advance_turn();
            tracing::debug!(turn = session.turn(), ?step, "applying step");
            step.apply(&mut session)?;
            on_turn(&mut session)?;
        }
        Ok(session)
    }
}
