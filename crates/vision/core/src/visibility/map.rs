use std::collections::{BTreeMap, HashMap};

use crate::config::VisionConfig;
use crate::env::{RenderHints, VisibilityEnv, VisionOracle};
use crate::state::{ObserverId, Position};

use super::{EyeballTracker, ObserverTracker, VisibilityCounter, VisibilityError};

/// Aggregate visibility for every observer and eyeball source in a level.
///
/// `VisibilityMap` is the only writer of the counter and both contribution
/// tables. Every operation runs to completion on the calling thread and
/// retracts an old contribution before applying its replacement, so render
/// hints reflect each boundary crossing rather than the net effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityMap {
    config: VisionConfig,
    counter: VisibilityCounter,
    observers: ObserverTracker,
    eyeballs: EyeballTracker,
}

impl VisibilityMap {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            config,
            counter: VisibilityCounter::new(),
            observers: ObserverTracker::new(),
            eyeballs: EyeballTracker::new(),
        }
    }

    pub(crate) fn from_parts(
        config: VisionConfig,
        counter: VisibilityCounter,
        observers: ObserverTracker,
        eyeballs: EyeballTracker,
    ) -> Self {
        Self {
            config,
            counter,
            observers,
            eyeballs,
        }
    }

    // ===== observers =====

    /// Replaces the observer's contribution with `tiles` and returns the cells
    /// that became visible.
    pub fn update<H>(
        &mut self,
        hints: &mut H,
        observer: ObserverId,
        tiles: Vec<Position>,
    ) -> Vec<Position>
    where
        H: RenderHints + ?Sized,
    {
        self.observers.update(&mut self.counter, hints, observer, tiles)
    }

    /// Retracts the observer's contribution. No-op for untracked observers.
    pub fn remove<H>(&mut self, hints: &mut H, observer: ObserverId)
    where
        H: RenderHints + ?Sized,
    {
        self.observers.remove(&mut self.counter, hints, observer);
    }

    // ===== eyeballs =====

    /// (Re)computes the eyeball source at `position` with the shared eyeball vision.
    pub fn update_eyeball<E>(&mut self, env: &mut E, position: Position)
    where
        E: VisionOracle + RenderHints + ?Sized,
    {
        let vision = self.config.eyeball_vision;
        self.eyeballs.update(&mut self.counter, env, &vision, position);
    }

    /// Retracts the eyeball source at `position`. No-op when none is anchored there.
    pub fn remove_eyeball<H>(&mut self, hints: &mut H, position: Position)
    where
        H: RenderHints + ?Sized,
    {
        self.eyeballs.remove(&mut self.counter, hints, position);
    }

    // ===== world reactions =====

    /// Re-derives every contribution anchored at `position` after the world
    /// changed there.
    ///
    /// A tracked observer standing on `position` is updated with its current
    /// view, and an eyeball anchored on `position` is recomputed. The two
    /// checks are independent. Observers that were never tracked are left
    /// alone, so this never starts a new contribution.
    pub fn on_visibility_changed<E>(&mut self, env: &mut E, position: Position)
    where
        E: VisibilityEnv + ?Sized,
    {
        if let Some(observer) = env.observer_at(position)
            && self.observers.contains(observer)
        {
            let tiles = env.observer_visible_tiles(observer);
            self.update(env, observer, tiles);
        }
        if self.eyeballs.contains(position) {
            self.update_eyeball(env, position);
        }
    }

    // ===== queries =====

    pub fn is_visible(&self, position: Position) -> bool {
        self.counter.is_visible(position)
    }

    pub fn visibility_count(&self, position: Position) -> u32 {
        self.counter.count(position)
    }

    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.counter.visible_positions()
    }

    pub fn is_tracking(&self, observer: ObserverId) -> bool {
        self.observers.contains(observer)
    }

    pub fn has_eyeball(&self, position: Position) -> bool {
        self.eyeballs.contains(position)
    }

    pub fn observer_tiles(&self, observer: ObserverId) -> Option<&[Position]> {
        self.observers.tiles(observer)
    }

    pub fn eyeball_tiles(&self, position: Position) -> Option<&[Position]> {
        self.eyeballs.tiles(position)
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn counter(&self) -> &VisibilityCounter {
        &self.counter
    }

    pub fn observers(&self) -> &ObserverTracker {
        &self.observers
    }

    pub fn eyeballs(&self) -> &EyeballTracker {
        &self.eyeballs
    }

    /// Recomputes every count from the contribution tables and compares it
    /// with the counter.
    ///
    /// Reports the mismatch at the smallest position, so the result does not
    /// depend on hash order.
    pub fn verify(&self) -> Result<(), VisibilityError> {
        let mut expected: HashMap<Position, u32> = HashMap::new();
        let contributed = self
            .observers
            .contributions()
            .values()
            .chain(self.eyeballs.contributions().values());
        for tiles in contributed {
            for &position in tiles {
                *expected.entry(position).or_default() += 1;
            }
        }

        let mismatches: BTreeMap<Position, (u32, u32)> = expected
            .keys()
            .chain(self.counter.counts().keys())
            .map(|&position| {
                let want = expected.get(&position).copied().unwrap_or(0);
                (position, (want, self.counter.count(position)))
            })
            .filter(|(_, (want, got))| want != got)
            .collect();

        match mismatches.into_iter().next() {
            Some((position, (expected, actual))) => Err(VisibilityError::CountMismatch {
                position,
                expected,
                actual,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NoRenderHints;
    use crate::visibility::test_helpers::{RecordingHints, ScriptedWorld};

    const A: ObserverId = ObserverId(1);
    const B: ObserverId = ObserverId(2);

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn two_observers_overlap_and_retract() {
        let mut map = VisibilityMap::default();
        let mut hints = RecordingHints::default();

        map.update(&mut hints, A, vec![p(0, 0), p(1, 0)]);
        map.update(&mut hints, B, vec![p(1, 0), p(2, 0)]);

        assert!(map.is_visible(p(0, 0)));
        assert!(map.is_visible(p(1, 0)));
        assert!(map.is_visible(p(2, 0)));
        assert_eq!(map.visibility_count(p(0, 0)), 1);
        assert_eq!(map.visibility_count(p(1, 0)), 2);
        assert_eq!(map.visibility_count(p(2, 0)), 1);
        hints.take();

        map.remove(&mut hints, A);

        assert!(!map.is_visible(p(0, 0)));
        assert!(map.is_visible(p(1, 0)));
        assert_eq!(map.visibility_count(p(1, 0)), 1);
        assert!(map.is_visible(p(2, 0)));
        assert_eq!(hints.take(), vec![p(0, 0)]);

        map.remove(&mut hints, B);
        assert_eq!(hints.take().len(), 2);
        assert_eq!(map.visible_positions().count(), 0);
    }

    #[test]
    fn eyeball_and_observer_combine_additively() {
        let mut map = VisibilityMap::default();
        let mut world = ScriptedWorld::default().with_view(p(4, 4), vec![p(4, 4), p(4, 5)]);

        map.update(&mut world, A, vec![p(4, 5)]);
        map.update_eyeball(&mut world, p(4, 4));

        assert_eq!(map.visibility_count(p(4, 5)), 2);
        world.hints.take();

        map.remove(&mut world, A);
        assert!(map.is_visible(p(4, 5)));
        assert!(world.hints.take().is_empty());

        map.remove_eyeball(&mut world, p(4, 4));
        assert!(!map.is_visible(p(4, 5)));
        assert_eq!(world.hints.take(), vec![p(4, 4), p(4, 5)]);
        map.verify().unwrap();
    }

    #[test]
    fn visibility_change_with_nothing_anchored_is_noop() {
        let mut map = VisibilityMap::default();
        let mut world = ScriptedWorld::default();
        map.update(&mut world, A, vec![p(0, 0)]);
        world.hints.take();
        let before = map.clone();

        map.on_visibility_changed(&mut world, p(8, 8));

        assert_eq!(map, before);
        assert!(world.hints.take().is_empty());
    }

    #[test]
    fn visibility_change_reapplies_tracked_observer() {
        let mut map = VisibilityMap::default();
        let mut world =
            ScriptedWorld::default().with_observer(A, p(2, 2), vec![p(2, 2), p(3, 2)]);
        map.update(&mut world, A, vec![p(2, 2), p(3, 2)]);

        // a wall went up at (3, 2)
        world.observer_views.insert(A, vec![p(2, 2)]);
        world.hints.take();
        map.on_visibility_changed(&mut world, p(2, 2));

        assert!(!map.is_visible(p(3, 2)));
        assert_eq!(map.observer_tiles(A), Some(&[p(2, 2)][..]));
        // (2, 2) flickers, (3, 2) is hidden
        assert_eq!(world.hints.count_for(p(2, 2)), 2);
        assert_eq!(world.hints.count_for(p(3, 2)), 1);
    }

    #[test]
    fn visibility_change_ignores_untracked_occupant() {
        let mut map = VisibilityMap::default();
        let mut world = ScriptedWorld::default().with_observer(B, p(1, 1), vec![p(1, 1)]);

        map.on_visibility_changed(&mut world, p(1, 1));

        assert!(!map.is_tracking(B));
        assert!(map.counter().is_empty());
    }

    #[test]
    fn visibility_change_updates_observer_and_eyeball_on_same_cell() {
        let mut map = VisibilityMap::default();
        let mut world = ScriptedWorld::default()
            .with_observer(A, p(5, 5), vec![p(5, 5)])
            .with_view(p(5, 5), vec![p(5, 6)]);
        map.update(&mut world, A, vec![p(5, 5)]);
        map.update_eyeball(&mut world, p(5, 5));

        world.observer_views.insert(A, vec![p(5, 5), p(6, 5)]);
        world.views.insert(p(5, 5), vec![p(5, 6), p(5, 7)]);
        map.on_visibility_changed(&mut world, p(5, 5));

        assert!(map.is_visible(p(6, 5)));
        assert!(map.is_visible(p(5, 7)));
        assert_eq!(map.eyeball_tiles(p(5, 5)), Some(&[p(5, 6), p(5, 7)][..]));
        map.verify().unwrap();
    }

    #[test]
    fn eyeballs_use_configured_vision() {
        struct RadiusWorld;
        impl VisionOracle for RadiusWorld {
            fn visible_tiles(&self, origin: Position, vision: &crate::Vision) -> Vec<Position> {
                (0..=vision.radius as i32)
                    .map(|dx| Position::new(origin.x + dx, origin.y))
                    .collect()
            }
        }
        impl RenderHints for RadiusWorld {
            fn set_needs_render_update(&mut self, _: Position, _: bool) {}
        }

        let mut map = VisibilityMap::new(VisionConfig::with_eyeball_radius(2));
        map.update_eyeball(&mut RadiusWorld, p(0, 0));

        assert!(map.is_visible(p(2, 0)));
        assert!(!map.is_visible(p(3, 0)));
    }

    #[test]
    fn headless_updates_need_no_hint_sink() {
        let mut map = VisibilityMap::default();

        let revealed = map.update(&mut NoRenderHints, A, vec![p(3, 3), p(3, 3)]);
        map.remove(&mut NoRenderHints, A);

        assert_eq!(revealed, vec![p(3, 3)]);
        assert!(!map.is_visible(p(3, 3)));
        assert_eq!(map.verify(), Ok(()));
    }

    #[test]
    fn verify_detects_drift() {
        let mut counts = HashMap::new();
        counts.insert(p(0, 0), 2);
        let mut contributions = HashMap::new();
        contributions.insert(A, vec![p(0, 0)]);
        let map = VisibilityMap::from_parts(
            VisionConfig::default(),
            VisibilityCounter::from_counts(counts),
            ObserverTracker::from_contributions(contributions),
            EyeballTracker::default(),
        );

        assert_eq!(
            map.verify(),
            Err(VisibilityError::CountMismatch {
                position: p(0, 0),
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    #[should_panic(expected = "visibility invariant violated")]
    fn retracting_corrupted_contribution_panics() {
        let mut contributions = HashMap::new();
        contributions.insert(A, vec![p(0, 0)]);
        let mut map = VisibilityMap::from_parts(
            VisionConfig::default(),
            VisibilityCounter::default(),
            ObserverTracker::from_contributions(contributions),
            EyeballTracker::default(),
        );

        map.remove(&mut RecordingHints::default(), A);
    }
}
