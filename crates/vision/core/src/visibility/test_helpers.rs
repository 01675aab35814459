//! Test doubles for the world collaborators.

use std::collections::HashMap;

use crate::env::{ObserverOracle, RenderHints, Vision, VisionOracle};
use crate::state::{ObserverId, Position};

/// Records every hinted position in call order.
#[derive(Debug, Default)]
pub struct RecordingHints {
    hinted: Vec<Position>,
}

impl RecordingHints {
    pub fn take(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.hinted)
    }

    pub fn count_for(&self, position: Position) -> usize {
        self.hinted.iter().filter(|p| **p == position).count()
    }
}

impl RenderHints for RecordingHints {
    fn set_needs_render_update(&mut self, position: Position, needs_update: bool) {
        assert!(needs_update, "hints are only ever raised");
        self.hinted.push(position);
    }
}

/// Scripted world: fields of view are looked up, not computed.
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    pub hints: RecordingHints,
    /// Tiles returned for any vision rule at the given origin.
    pub views: HashMap<Position, Vec<Position>>,
    pub occupants: HashMap<Position, ObserverId>,
    pub observer_views: HashMap<ObserverId, Vec<Position>>,
}

impl ScriptedWorld {
    pub fn with_view(mut self, origin: Position, tiles: Vec<Position>) -> Self {
        self.views.insert(origin, tiles);
        self
    }

    pub fn with_observer(mut self, id: ObserverId, at: Position, tiles: Vec<Position>) -> Self {
        self.occupants.insert(at, id);
        self.observer_views.insert(id, tiles);
        self
    }
}

impl VisionOracle for ScriptedWorld {
    fn visible_tiles(&self, origin: Position, _vision: &Vision) -> Vec<Position> {
        self.views.get(&origin).cloned().unwrap_or_default()
    }
}

impl ObserverOracle for ScriptedWorld {
    fn observer_at(&self, position: Position) -> Option<ObserverId> {
        self.occupants.get(&position).copied()
    }

    fn observer_visible_tiles(&self, observer: ObserverId) -> Vec<Position> {
        self.observer_views
            .get(&observer)
            .cloned()
            .unwrap_or_default()
    }
}

impl RenderHints for ScriptedWorld {
    fn set_needs_render_update(&mut self, position: Position, needs_update: bool) {
        self.hints.set_needs_render_update(position, needs_update);
    }
}
