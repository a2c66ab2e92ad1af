//! Configuration loading and data-directory resolution

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rewards::DEFAULT_HISTORY_LIMIT;

/// Application configuration paths
pub struct Config;

impl Config {
    /// Data directory (`~/.everwell`, overridable with `EVERWELL_DATA_DIR`)
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("EVERWELL_DATA_DIR") {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".everwell")
    }

    /// Path to the settings file
    pub fn settings_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// User settings (`~/.everwell/config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Identity used by the CLI when `--identity` is not given
    #[serde(default)]
    pub identity: Option<String>,

    /// Maximum ledger history entries kept per identity
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            identity: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Settings {
    /// Load settings from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        let path = Config::settings_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        Ok(settings)
    }
}
