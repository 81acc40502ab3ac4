use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{cascade, MAX_DIM, MIN_DIM};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the shared game-state file.
    pub state_file: PathBuf,
    /// Delay between mailbox polls while a remote side is thinking.
    pub poll_interval_ms: u64,
    /// Consecutive failed polls before giving up; 0 polls forever.
    pub max_poll_attempts: u64,
    /// Ceiling on cascade rounds per move.
    pub cascade_round_limit: usize,
    /// Board dimensions offered by default on the size-entry screen.
    pub default_rows: usize,
    pub default_cols: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            state_file: PathBuf::from("gamestate.txt"),
            poll_interval_ms: 300,
            max_poll_attempts: 0,
            cascade_round_limit: cascade::DEFAULT_ROUND_LIMIT,
            default_rows: 9,
            default_cols: 6,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be > 0".into(),
            ));
        }
        if self.cascade_round_limit == 0 {
            return Err(ConfigError::Validation(
                "cascade_round_limit must be >= 1".into(),
            ));
        }
        for (name, value) in [
            ("default_rows", self.default_rows),
            ("default_cols", self.default_cols),
        ] {
            if !(MIN_DIM..=MAX_DIM).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{} must be in {}..={}",
                    name, MIN_DIM, MAX_DIM
                )));
            }
        }
        Ok(())
    }
}
