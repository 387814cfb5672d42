//! CLI command implementations for Tally.

pub(crate) mod play;
pub(crate) mod run;

mod output;
mod script;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use tally::config::Config;
use tally::i18n::Catalog;
use tally::{OutOfBounds, Roster, Session};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<OutOfBounds> for CliError {
    fn from(e: OutOfBounds) -> Self {
        Self::new(e.to_string())
    }
}

/// Session set up from the configuration, with localized placeholder names.
pub(crate) fn new_session(config: &Config, strings: &Catalog) -> Session {
    Session::with_setup(Roster::localized(strings), config.categories())
}
