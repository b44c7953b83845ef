//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the remq CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// remq - search reminder snapshots
#[derive(Parser, Debug)]
#[command(name = "remq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Snapshot file to search (default: from config, then ~/.cache/remq/snapshot.json)
    #[arg(long, global = true, env = "REMQ_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search reminders
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List reminder lists with record counts
    Lists,

    /// Resolve a date literal against the current time
    ResolveDate {
        /// Date literal (e.g., "tomorrow", "end of week", "in 3 days", "2025-01-10")
        literal: String,

        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments for the search command.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Filter expression (e.g., "priority = high AND dueDate before tomorrow")
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Logic tree as JSON, or @FILE to read it from a file
    #[arg(long)]
    pub logic: Option<String>,

    /// Full search request JSON file; other flags are applied on top
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Free-text search over title and notes
    #[arg(long)]
    pub query: Option<String>,

    /// Group by field[:granularity] (repeatable, e.g. "list", "dueDate:week")
    #[arg(short, long = "group-by", action = clap::ArgAction::Append)]
    pub group_by: Vec<String>,

    /// Sort by field[:asc|desc] (repeatable, e.g. "dueDate", "priority:desc")
    #[arg(long, action = clap::ArgAction::Append)]
    pub sort: Vec<String>,

    /// Maximum number of records to return (default: from config)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Number of records to skip
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,

    /// Include completed reminders
    #[arg(short = 'a', long)]
    pub include_completed: bool,

    /// Restrict to a list (repeatable)
    #[arg(short, long, action = clap::ArgAction::Append)]
    pub list: Vec<String>,

    #[command(flatten)]
    pub clock: ClockArgs,
}

/// Reference time options shared by commands that resolve relative dates.
#[derive(Args, Debug, Default, Clone)]
pub struct ClockArgs {
    /// Reference instant as RFC 3339 (default: current time)
    #[arg(long)]
    pub now: Option<String>,

    /// IANA timezone for the local calendar (e.g., "Europe/Berlin")
    #[arg(long)]
    pub tz: Option<String>,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.color", "search.limit")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
