//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default problem list applied when commands are run without `--list`
//! - Whether `solve` opens the problem URL in a browser
//!
//! Configuration is stored at `~/.config/prepdeck/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

fn default_true() -> bool {
    true
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/prepdeck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// List label assumed when no `--list` is given.
    #[serde(default)]
    pub default_list: Option<String>,
    /// Open the problem URL in a browser when solving.
    #[serde(default = "default_true")]
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_list: None,
            open_browser: true,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/prepdeck"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults if no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.default_list.is_none());
        assert!(config.open_browser);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            default_list: Some("NeetCode 150".to_string()),
            open_browser: false,
        };
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.default_list.as_deref(), Some("NeetCode 150"));
        assert!(!reloaded.open_browser);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_list = \"Blind 75\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_list.as_deref(), Some("Blind 75"));
        assert!(config.open_browser);
    }
}
