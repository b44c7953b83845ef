//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they need a snapshot: config, completions and
//! date resolution run without one, search and lists read it.

use reminders_query_rs::SnapshotStore;

use crate::cli::{ClockArgs, Cli, Commands, ConfigCommands, SearchArgs, Shell};
use crate::commands::config::Config;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without a snapshot.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read the snapshot.
pub trait SnapshotCommand {
    /// Execute the command against the given store.
    fn execute(&self, ctx: &CommandContext, store: &SnapshotStore, config: &Config) -> Result<()>;
}

/// Commands that don't read the snapshot.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    ResolveDate {
        literal: &'a str,
        clock: &'a ClockArgs,
    },
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs the snapshot.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::ResolveDate { literal, clock }) => {
                Some(Self::ResolveDate { literal, clock })
            }
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::ResolveDate { literal, clock } => {
                commands::resolve_date::execute(ctx, literal, clock)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("remq - search reminder snapshots");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that read the snapshot.
pub enum SnapshotDispatch<'a> {
    Search(&'a SearchArgs),
    Lists,
}

impl<'a> SnapshotDispatch<'a> {
    /// Create a snapshot dispatch from the CLI command.
    /// Returns None for commands handled by [`StandaloneDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Search(args)) => Some(Self::Search(args)),
            Some(Commands::Lists) => Some(Self::Lists),
            _ => None,
        }
    }
}

impl SnapshotCommand for SnapshotDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, store: &SnapshotStore, config: &Config) -> Result<()> {
        match self {
            Self::Search(args) => commands::search::execute(ctx, args, store, config),
            Self::Lists => commands::lists::execute(ctx, store),
        }
    }
}
