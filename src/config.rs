//! Configuration file.
//!
//! An optional TOML file; every field has a default, so an empty file (or
//! no file at all) is a valid configuration:
//!
//! ```toml
//! language = "pl"
//! categories = ["categories.c1", "Roads", "Cities"]
//! log_filter = "tally=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::i18n::detect_language;
use crate::score::{Category, DEFAULT_CATEGORY_KEYS};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";

/// Settings for a tally session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Language code for display strings. Detected from the environment
    /// when unset.
    #[serde(default)]
    pub language: Option<String>,
    /// Scoring categories as lookup keys (or literal labels), in sheet order.
    #[serde(default = "default_category_keys")]
    pub categories: Vec<String>,
    /// `tracing` filter directive used when `TALLY_LOG` is not set.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            categories: default_category_keys(),
            log_filter: None,
        }
    }
}

fn default_category_keys() -> Vec<String> {
    DEFAULT_CATEGORY_KEYS.iter().map(ToString::to_string).collect()
}

impl Config {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file was found but could not be loaded. An
    /// explicitly given path that does not exist is an error too.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Language to use: `requested` if given, then the configured one, then
    /// the environment's.
    #[must_use]
    pub fn resolve_language(&self, requested: Option<&str>) -> String {
        requested
            .or(self.language.as_deref())
            .map_or_else(|| detect_language().to_string(), str::to_string)
    }

    /// Configured categories.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.categories.iter().map(Category::new).collect()
    }
}

/// Error loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid TOML or has fields of the wrong type.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(_) => None,
        }
    }
}
