//! Command implementations for the remq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod lists;
pub mod resolve_date;
pub mod search;

use std::env;
use std::path::PathBuf;

use reminders_query_rs::SnapshotStore;

use crate::cli::Cli;
use crate::output::DateFormat;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] reminders_query_rs::filter::FilterError),

    /// Snapshot store error.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] reminders_query_rs::SnapshotStoreError),

    /// Invalid request arguments.
    #[error("invalid request: {0}")]
    Request(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// How due dates are rendered in tables.
    pub date_format: DateFormat,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            date_format: DateFormat::default(),
        }
    }

    /// Applies output preferences from the config file.
    ///
    /// Flags and `NO_COLOR` win over the file: a config can only turn colors off.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        if let Some(format) = config.output.date_format.as_deref() {
            match DateFormat::from_name(format) {
                Some(format) => self.date_format = format,
                None => log::warn!("ignoring unknown output.date_format '{}'", format),
            }
        }
        self
    }
}

/// Resolves the snapshot path with priority: flag/env > config > default cache path.
pub fn snapshot_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(path) = &cli.snapshot {
        return Ok(path.clone());
    }
    if let Some(path) = &config.snapshot {
        return Ok(path.clone());
    }
    Ok(SnapshotStore::default_path()?)
}
