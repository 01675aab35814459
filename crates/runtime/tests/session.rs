use runtime::{
    GridWorld, RenderUpdate, RuntimeError, TerrainKind, TerrainMap, VisionSession,
};
use vision_core::{ObserverId, Position, Vision, VisionConfig};

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn corridor(row: &str) -> VisionSession {
    let terrain = TerrainMap::from_rows(&[row]).unwrap();
    VisionSession::new(GridWorld::new(terrain), VisionConfig::default())
}

fn update(x: i32, visible: bool) -> RenderUpdate {
    RenderUpdate {
        position: p(x, 0),
        visible,
    }
}

#[test]
fn overlapping_observers_share_a_cell() {
    let mut session = corridor(".......");
    let a = session.spawn_observer(p(0, 0), Vision::new(2)).unwrap();
    session.spawn_observer(p(4, 0), Vision::new(2)).unwrap();
    session.take_render_updates();

    assert_eq!(session.visibility().visibility_count(p(2, 0)), 2);

    session.despawn(a).unwrap();

    assert!(session.is_visible(p(2, 0)));
    assert_eq!(
        session.take_render_updates(),
        vec![update(0, false), update(1, false)]
    );
    assert_eq!(session.visibility().verify(), Ok(()));
}

#[test]
fn wall_placed_in_view_hides_cells_behind_it() {
    let mut session = corridor("......");
    session.spawn_observer(p(0, 0), Vision::new(5)).unwrap();
    session.take_render_updates();

    let previous = session.set_terrain(p(2, 0), TerrainKind::Wall).unwrap();

    assert_eq!(previous, TerrainKind::Floor);
    assert_eq!(session.visible_positions(), vec![p(0, 0), p(1, 0), p(2, 0)]);
    assert_eq!(
        session.take_render_updates(),
        vec![
            update(0, true),
            update(1, true),
            update(2, true),
            update(3, false),
            update(4, false),
            update(5, false),
        ]
    );

    session.set_terrain(p(2, 0), TerrainKind::Floor).unwrap();

    assert_eq!(session.visible_positions().len(), 6);
}

#[test]
fn unchanged_terrain_does_not_refresh() {
    let mut session = corridor("...");
    session.spawn_observer(p(0, 0), Vision::new(2)).unwrap();
    session.take_render_updates();

    session.set_terrain(p(1, 0), TerrainKind::Floor).unwrap();

    assert!(session.take_render_updates().is_empty());
}

#[test]
fn terrain_change_refreshes_eyeballs() {
    let mut session = corridor("......");
    session.place_eyeball(p(5, 0)).unwrap();
    assert_eq!(session.visible_positions().len(), 6);

    session.set_terrain(p(3, 0), TerrainKind::Wall).unwrap();

    assert_eq!(session.visible_positions(), vec![p(3, 0), p(4, 0), p(5, 0)]);
    assert_eq!(session.visibility().verify(), Ok(()));
}

#[test]
fn huge_radii_stay_within_the_map() {
    let mut session = corridor("....");
    session.spawn_observer(p(0, 0), Vision::new(u32::MAX)).unwrap();
    session.spawn_observer(p(1, 0), Vision::new(i32::MAX as u32)).unwrap();

    assert_eq!(session.visibility().visibility_count(p(3, 0)), 2);

    session.set_terrain(p(2, 0), TerrainKind::Wall).unwrap();

    assert_eq!(session.visible_positions(), vec![p(0, 0), p(1, 0), p(2, 0)]);
    assert_eq!(session.visibility().verify(), Ok(()));
}

#[test]
fn eyeball_radius_comes_from_config() {
    let terrain = TerrainMap::from_rows(&["......"]).unwrap();
    let mut session =
        VisionSession::new(GridWorld::new(terrain), VisionConfig::with_eyeball_radius(1));

    session.place_eyeball(p(2, 0)).unwrap();

    assert_eq!(session.visible_positions(), vec![p(1, 0), p(2, 0), p(3, 0)]);
}

#[test]
fn untracked_creature_contributes_nothing() {
    let mut session = corridor("......");
    let creature = session.spawn_creature(p(0, 0), Vision::new(5)).unwrap();

    session.set_terrain(p(2, 0), TerrainKind::Wall).unwrap();
    session.move_creature(creature, p(1, 0)).unwrap();

    assert!(!session.is_tracking(creature));
    assert!(session.visible_positions().is_empty());

    session.start_tracking(creature).unwrap();

    assert!(session.is_visible(p(2, 0)));
    assert!(!session.is_visible(p(3, 0)));
}

#[test]
fn stop_tracking_keeps_creature_in_world() {
    let mut session = corridor("...");
    let id = session.spawn_observer(p(0, 0), Vision::new(1)).unwrap();

    session.stop_tracking(id);

    assert!(session.visible_positions().is_empty());
    assert!(session.world().creature(id).is_some());
}

#[test]
fn moving_observer_follows_its_view() {
    let mut session = corridor(".....");
    let id = session.spawn_observer(p(0, 0), Vision::new(1)).unwrap();
    session.take_render_updates();

    session.move_creature(id, p(3, 0)).unwrap();

    assert_eq!(session.visible_positions(), vec![p(2, 0), p(3, 0), p(4, 0)]);
    assert_eq!(
        session.take_render_updates(),
        vec![
            update(0, false),
            update(1, false),
            update(2, true),
            update(3, true),
            update(4, true),
        ]
    );
}

#[test]
fn blocked_move_leaves_visibility_untouched() {
    let mut session = corridor("....");
    let a = session.spawn_observer(p(0, 0), Vision::new(1)).unwrap();
    let b = session.spawn_creature(p(1, 0), Vision::new(1)).unwrap();
    let before = session.snapshot();

    let err = session.move_creature(a, p(1, 0)).unwrap_err();

    assert!(matches!(err, RuntimeError::Occupied { occupant, .. } if occupant == b));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn unknown_handles_and_cells_are_rejected() {
    let mut session = corridor("...");

    assert!(matches!(
        session.despawn(ObserverId(7)),
        Err(RuntimeError::UnknownObserver(ObserverId(7)))
    ));
    assert!(matches!(
        session.start_tracking(ObserverId(7)),
        Err(RuntimeError::UnknownObserver(_))
    ));
    assert!(matches!(
        session.place_eyeball(p(3, 0)),
        Err(RuntimeError::OutOfBounds { .. })
    ));

    // absent eyeball
    session.remove_eyeball(p(1, 0));
    assert!(session.visible_positions().is_empty());
}

#[test]
fn retracking_flickers_unshared_cells() {
    let mut session = corridor("...");
    let id = session.spawn_observer(p(0, 0), Vision::new(1)).unwrap();
    session.take_render_updates();

    session.start_tracking(id).unwrap();

    assert_eq!(
        session.take_render_updates(),
        vec![update(0, true), update(1, true)]
    );
    assert_eq!(session.visibility().visibility_count(p(0, 0)), 1);
}

#[test]
fn render_ascii_marks_hidden_cells_blank() {
    let mut session = corridor("...");
    session.spawn_observer(p(0, 0), Vision::new(1)).unwrap();

    assert_eq!(session.render_ascii(), "@. \n");
}
