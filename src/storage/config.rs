//! Configuration handling
//!
//! Configuration is read from `config.toml` in the platform config
//! directory (e.g. `~/.config/contact-book/config.toml`) unless another
//! file is given with `--config`. Every key is optional.
//!
//! ```toml
//! book_path = "/home/me/contacts.jsonl"
//! birthday_window_days = 7
//! default_format = "text"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DEFAULT_WINDOW_DAYS;

/// File name of the address book snapshot
pub const BOOK_FILE: &str = "contacts.jsonl";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Snapshot file (defaults to the platform data directory)
    pub book_path: Option<PathBuf>,

    /// Width of the `birthdays` window in days
    pub birthday_window_days: u32,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            book_path: None,
            birthday_window_days: DEFAULT_WINDOW_DAYS,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "contact-book", "contact-book")
    }

    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from `path`, or the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.birthday_window_days == 0 {
            return Err(ConfigError::Invalid(
                "birthday_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the snapshot path: explicit override, config, data dir, cwd
    pub fn book_path(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }
        if let Some(path) = &self.book_path {
            return path.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(BOOK_FILE))
            .unwrap_or_else(|| PathBuf::from(BOOK_FILE))
    }

    /// Saves configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
