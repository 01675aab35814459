//! Platform-specific directory utilities
//!
//! Snapshot locations come from [`RuntimeConfig`]; logs live in the
//! platform cache directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use runtime::RuntimeConfig;

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/vision/logs`
/// - Linux: `~/.cache/vision/logs` (or `$XDG_CACHE_HOME/vision/logs`)
/// - Windows: `%LOCALAPPDATA%\vision\logs`
/// - Fallback: `/tmp/vision/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "vision")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/vision"))
        .join("logs")
}

/// Root holding every session's snapshot directory.
pub fn snapshot_root(config: &RuntimeConfig) -> PathBuf {
    RuntimeConfig {
        session_id: None,
        ..config.clone()
    }
    .snapshot_dir()
}

/// Most recently modified session directory under `root`, if any.
pub fn latest_session(root: &Path) -> Result<Option<String>> {
    if !root.exists() {
        return Ok(None);
    }

    let mut latest: Option<(std::time::SystemTime, String)> = None;
    for entry in std::fs::read_dir(root)
        .with_context(|| format!("Failed to read snapshot directory: {}", root.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir()
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            let modified = entry.metadata()?.modified()?;
            if latest.as_ref().is_none_or(|(newest, _)| modified > *newest) {
                latest = Some((modified, name.to_string()));
            }
        }
    }

    Ok(latest.map(|(_, name)| name))
}

/// `session_<unix seconds>`, used when no session id is configured.
pub fn fresh_session_id() -> String {
    let seconds = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{seconds}")
}
