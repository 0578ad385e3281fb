//! TOML-based application configuration.
//!
//! Stored at `~/.config/menuplan/config.toml`. Every field has a
//! default so a missing file or a partial file both work.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the REST backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Override for the local store directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            data_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from the platform config directory; a missing file yields
    /// the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Write to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("menuplan").join(CONFIG_FILE))
    }
}
