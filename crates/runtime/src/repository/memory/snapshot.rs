//! In-memory [`SnapshotRepository`] for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use vision_core::VisibilitySnapshot;

use crate::repository::{RepositoryError, Result, SnapshotRepository};

#[derive(Default)]
pub struct InMemorySnapshotRepo {
    snapshots: RwLock<BTreeMap<u64, VisibilitySnapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, turn: u64, snapshot: &VisibilitySnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(turn, snapshot.clone());
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<VisibilitySnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&turn).cloned())
    }

    fn exists(&self, turn: u64) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&turn))
            .unwrap_or(false)
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&turn);
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_and_prune() {
        let repo = InMemorySnapshotRepo::new();
        let snapshot = VisibilitySnapshot::default();
        for turn in [3, 1, 2] {
            repo.save(turn, &snapshot).unwrap();
        }

        assert_eq!(repo.list_turns().unwrap(), vec![1, 2, 3]);
        assert_eq!(repo.latest_turn().unwrap(), Some(3));
        assert_eq!(repo.load(2).unwrap(), Some(snapshot));
        assert_eq!(repo.prune_before(3).unwrap(), 2);
        assert!(!repo.exists(1));
        assert!(repo.load(1).unwrap().is_none());
    }
}
