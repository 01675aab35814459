//! Runtime configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use vision_core::{Vision, VisionConfig};

/// Radius given to observers whose placement names none.
pub const DEFAULT_OBSERVER_RADIUS: u32 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub vision: VisionConfig,
    pub default_observer_radius: u32,
    pub session_id: Option<String>,
    pub save_data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            default_observer_radius: DEFAULT_OBSERVER_RADIUS,
            session_id: None,
            save_data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Reads overrides from the environment, keeping defaults for anything
    /// unset or unparsable.
    ///
    /// - `VISION_EYEBALL_RADIUS`: radius shared by every eyeball
    /// - `VISION_DEFAULT_RADIUS`: radius for observers without one
    /// - `GAME_SESSION_ID`: subdirectory for this session's snapshots
    /// - `SAVE_DATA_DIR`: root directory for snapshots
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(radius) = read_env::<u32>("VISION_EYEBALL_RADIUS") {
            config.vision = VisionConfig::with_eyeball_radius(radius);
        }

        if let Some(radius) = read_env::<u32>("VISION_DEFAULT_RADIUS") {
            config.default_observer_radius = radius;
        }

        config.session_id = env::var("GAME_SESSION_ID").ok();
        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    pub fn default_observer_vision(&self) -> Vision {
        Vision::new(self.default_observer_radius)
    }

    /// Directory snapshots for this session are written to.
    ///
    /// Falls back to the platform data directory, then `./save_data`.
    pub fn snapshot_dir(&self) -> PathBuf {
        let base = self.save_data_dir.clone().unwrap_or_else(default_data_dir);
        let base = base.join("snapshots");
        match &self.session_id {
            Some(session) => base.join(session),
            None => base,
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "vision")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
