//! Host configuration, loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bugstorm_core::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use bugstorm_sim::SimConfig;

use crate::error::AppError;

/// Everything the binary needs to run one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    /// Hard stop for the loop, reached even if the session never ends.
    pub max_ticks: u64,
    /// Sleep between ticks to hold the nominal frame rate and time cooldowns
    /// on the real clock. Otherwise the cooldown clock advances one tick per frame.
    pub realtime: bool,
    /// JSON file backing the key-value store. In-memory when absent.
    pub store_path: Option<PathBuf>,
    /// Drive the player with a scripted input pattern and pick offers automatically.
    pub autopilot: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            max_ticks: 60 * 60 * 10,
            realtime: false,
            store_path: None,
            autopilot: true,
        }
    }
}

impl AppConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_world_constants() {
        let config = AppConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.width, WORLD_WIDTH);
        assert_eq!(config.height, WORLD_HEIGHT);
        assert!(config.store_path.is_none());
        assert!(!config.realtime);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"seed": 7, "realtime": true}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.realtime);
        assert_eq!(config.max_ticks, AppConfig::default().max_ticks);
        assert_eq!(config.sim_config().seed, 7);
        assert_eq!(config.sim_config().width, WORLD_WIDTH);
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("bugstorm_test_config_missing.json");
        let _ = fs::remove_file(&path);
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigIo { .. }));
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = std::env::temp_dir().join("bugstorm_test_config_bad");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(
            AppConfig::load_or_default(None).unwrap(),
            AppConfig::default()
        );
    }
}
