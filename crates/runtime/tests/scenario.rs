use std::path::Path;

use runtime::{InMemorySnapshotRepo, RuntimeConfig, Scenario, SnapshotRepository};
use vision_core::{ObserverId, Position};

fn courtyard() -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/courtyard.ron");
    Scenario::load_from_file(&path).unwrap()
}

#[test]
fn courtyard_runs_to_completion() {
    let scenario = courtyard();
    let repo = InMemorySnapshotRepo::new();

    let session = scenario
        .run(&RuntimeConfig::default(), |session| {
            session
                .visibility()
                .verify()
                .map_err(runtime::RuntimeError::from)?;
            session.save(&repo)
        })
        .unwrap();

    assert_eq!(session.turn(), scenario.steps.len() as u64);
    assert_eq!(
        repo.list_turns().unwrap(),
        (0..=scenario.steps.len() as u64).collect::<Vec<_>>()
    );
    assert!(session.is_tracking(ObserverId::PLAYER));
    assert!(!session.is_tracking(ObserverId(1)));
    assert!(session.world().creature(ObserverId(2)).is_none());
    assert!(session.has_eyeball(Position::new(10, 1)));
    assert!(session.has_eyeball(Position::new(1, 5)));
}

#[test]
fn every_saved_turn_restores_cleanly() {
    let scenario = courtyard();
    let repo = InMemorySnapshotRepo::new();
    let mut session = scenario
        .run(&RuntimeConfig::default(), |session| session.save(&repo))
        .unwrap();

    for turn in repo.list_turns().unwrap() {
        session.restore(&repo, turn).unwrap();
        assert_eq!(session.turn(), turn);
        assert_eq!(Some(session.snapshot()), repo.load(turn).unwrap());
    }
}

#[test]
fn digests_differ_between_turns() {
    let scenario = courtyard();
    let repo = InMemorySnapshotRepo::new();
    scenario
        .run(&RuntimeConfig::default(), |session| session.save(&repo))
        .unwrap();

    let first = repo.load(0).unwrap().unwrap();
    let last = repo.latest_turn().unwrap().and_then(|turn| repo.load(turn).unwrap()).unwrap();

    assert_ne!(first.digest(), last.digest());
}
