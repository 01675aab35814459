//! Repository contract for saving and loading visibility snapshots.

use vision_core::VisibilitySnapshot;

use super::Result;

/// Turn-indexed store of [`VisibilitySnapshot`]s.
pub trait SnapshotRepository: Send + Sync {
    fn save(&self, turn: u64, snapshot: &VisibilitySnapshot) -> Result<()>;

    /// Returns `None` when nothing was saved for `turn`.
    fn load(&self, turn: u64) -> Result<Option<VisibilitySnapshot>>;

    fn exists(&self, turn: u64) -> bool;

    /// Deleting a missing turn is not an error.
    fn delete(&self, turn: u64) -> Result<()>;

    /// Saved turns in ascending order.
    fn list_turns(&self) -> Result<Vec<u64>>;

    fn latest_turn(&self) -> Result<Option<u64>> {
        Ok(self.list_turns()?.last().copied())
    }

    /// Deletes every saved turn older than `turn` and returns how many went.
    fn prune_before(&self, turn: u64) -> Result<usize> {
        let mut deleted = 0;
        for saved in self.list_turns()? {
            if saved < turn {
                self.delete(saved)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
