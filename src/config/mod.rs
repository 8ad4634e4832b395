//! Configuration system for navquill.
//!
//! This module provides the configuration structure with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is
//! loaded from a TOML file and may be overridden from the command line.
//!
//! # Example
//!
//! ```
//! use navquill::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.max_history, 100);
//! assert_eq!(config.log_level, "warn");
//!
//! let custom = Config {
//!     max_history: 20,
//!     ..Config::default()
//! };
//! assert_eq!(custom.max_history, 20);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for navquill.
///
/// # Fields
///
/// * `max_history` - Maximum number of remembered positions (default: 100)
/// * `log_level` - Default `env_logger` filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of remembered positions
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default history length.
fn default_max_history() -> usize {
    100
}

/// Returns the default log filter.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/navquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("navquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    ///
    /// Use [`Config::try_load_from`] when a malformed file must be reported
    /// before a logger exists.
    pub fn load_from(path: &std::path::Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|err| {
            log::warn!("Ignoring config: {:#}", err);
            Self::default()
        })
    }

    /// Like [`Config::load`], but returns read and parse errors.
    ///
    /// A missing file or home directory still yields the defaults.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::try_load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load_from`], but returns read and parse errors.
    pub fn try_load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Malformed config {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// History bound actually applied; a zero bound would drop every entry.
    pub fn history_bound(&self) -> usize {
        self.max_history.max(1)
    }
}
