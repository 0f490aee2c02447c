//! Configuration management for cellstyle.
//!
//! The configuration file is located at `~/.cellstyle/config.toml`:
//!
//! ```toml
//! # Log level when RUST_LOG is unset: error, warn, info, debug, trace
//! log_level = "info"
//!
//! [html]
//! standalone = false
//! merge_runs = true
//! fill_blank = true
//! title = "Terminal capture"
//! font_family = "monospace"
//!
//! [stylesheet]
//! dim_opacity = 0.5
//! blink_period_ms = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config: {0}")]
    Write(#[source] std::io::Error),

    #[error("Could not determine config path")]
    NoHome,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// HTML output settings
    pub html: HtmlConfig,
    /// Generated stylesheet settings
    pub stylesheet: StylesheetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            html: HtmlConfig::default(),
            stylesheet: StylesheetConfig::default(),
        }
    }
}

/// HTML output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Emit a full document instead of a fragment
    pub standalone: bool,
    /// Coalesce neighbouring cells that look the same
    pub merge_runs: bool,
    /// Render empty cells as a space
    pub fill_blank: bool,
    pub title: String,
    pub font_family: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            merge_runs: true,
            fill_blank: true,
            title: "Terminal capture".to_string(),
            font_family: "monospace".to_string(),
        }
    }
}

/// Stylesheet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    pub dim_opacity: f32,
    pub blink_period_ms: u32,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.5,
            blink_period_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring config: {}", e),
                }
            }
        }
        Self::default()
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoHome)?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("config.toml"))
    }
}

/// `~/.cellstyle`
pub fn data_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".cellstyle"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
