//! Configuration management for retab
//!
//! Defaults can be set in ~/.retab/config.toml; command-line flags win over
//! the file, and the file wins over the built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Contents of the optional config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Indentation settings
    #[serde(default)]
    pub indent: IndentConfig,

    /// Backup settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndentConfig {
    /// Indent with tabs instead of spaces
    #[serde(default)]
    pub use_tabs: Option<bool>,

    /// Columns per indentation unit
    #[serde(default = "default_tab_width")]
    pub tab_width: Option<usize>,

    /// Strip trailing spaces and tabs
    #[serde(default)]
    pub trim_trailing: Option<bool>,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            use_tabs: Some(false),
            tab_width: Some(DEFAULT_TAB_WIDTH),
            trim_trailing: Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Keep the original as `<path>~`
    #[serde(default)]
    pub keep_backup: Option<bool>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            keep_backup: Some(false),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Debug log file (optional)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_tab_width() -> Option<usize> { Some(DEFAULT_TAB_WIDTH) }

/// Resolved, read-only settings for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub use_tabs: bool,
    pub tab_width: NonZeroUsize,
    pub trim_trailing: bool,
    pub keep_backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_tabs: false,
            tab_width: NonZeroUsize::new(DEFAULT_TAB_WIDTH).unwrap_or(NonZeroUsize::MIN),
            trim_trailing: false,
            keep_backup: false,
        }
    }
}

impl Settings {
    /// Build settings from a validated config file, falling back to defaults
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_config(config)?;

        let defaults = Self::default();
        let tab_width = match config.indent.tab_width {
            Some(n) => NonZeroUsize::new(n)
                .ok_or_else(|| anyhow::anyhow!("Invalid tab_width: 0 (must be at least 1)"))?,
            None => defaults.tab_width,
        };

        Ok(Self {
            use_tabs: config.indent.use_tabs.unwrap_or(defaults.use_tabs),
            tab_width,
            trim_trailing: config.indent.trim_trailing.unwrap_or(defaults.trim_trailing),
            keep_backup: config.backup.keep_backup.unwrap_or(defaults.keep_backup),
        })
    }
}

/// Get the default configuration file path (~/.retab/config.toml)
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    Ok(home_dir.join(".retab").join("config.toml"))
}

/// Load and parse a config file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Load the config file
///
/// An explicit path must exist. Without one, the default location is used
/// if present, and built-in defaults otherwise. The file is never created.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let default_path = match config_file_path() {
        Ok(path) => path,
        Err(_) => return Ok(Config::default()),
    };

    if default_path.is_file() {
        load_config_from(&default_path)
    } else {
        Ok(Config::default())
    }
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(width) = config.indent.tab_width {
        if width == 0 {
            anyhow::bail!("Invalid tab_width: {} (must be at least 1)", width);
        }
    }

    Ok(())
}
