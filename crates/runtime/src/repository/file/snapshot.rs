//! File-based [`SnapshotRepository`] implementation.

use std::fs;
use std::path::{Path, PathBuf};

use vision_core::VisibilitySnapshot;

use crate::repository::{RepositoryError, Result, SnapshotRepository};

/// Stores each snapshot as `visibility_{turn}.bin` in bincode format.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash never leaves a half-written snapshot under the final name.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn snapshot_path(&self, turn: u64) -> PathBuf {
        self.base_dir.join(format!("visibility_{turn}.bin"))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, turn: u64, snapshot: &VisibilitySnapshot) -> Result<()> {
        let path = self.snapshot_path(turn);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(turn, path = %path.display(), "saved visibility snapshot");
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<VisibilitySnapshot>> {
        let path = self.snapshot_path(turn);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot: VisibilitySnapshot =
            bincode::deserialize(&bytes).map_err(|e| RepositoryError::CorruptedData {
                turn,
                reason: e.to_string(),
            })?;

        tracing::debug!(turn, path = %path.display(), "loaded visibility snapshot");
        Ok(Some(snapshot))
    }

    fn exists(&self, turn: u64) -> bool {
        self.snapshot_path(turn).exists()
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let path = self.snapshot_path(turn);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(turn, "deleted visibility snapshot");
        }
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let mut turns = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn) = filename
                    .strip_prefix("visibility_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(turn) = turn.parse::<u64>()
            {
                turns.push(turn);
            }
        }

        turns.sort_unstable();
        Ok(turns)
    }
}
