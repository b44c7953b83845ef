use clap::Parser;
use reminders_query_rs::SnapshotStore;
use std::process::ExitCode;

mod cli;
mod clock;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{snapshot_path, CommandContext, CommandError};
use dispatch::{SnapshotCommand, SnapshotDispatch, StandaloneCommand, StandaloneDispatch};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Initializes logging: `-v` shows debug output, `-q` only errors.
/// `RUST_LOG` overrides both.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = ctx.with_config(&config);
    let store = SnapshotStore::with_path(snapshot_path(cli, &config)?);

    if let Some(dispatch) = SnapshotDispatch::from_cli(cli) {
        return dispatch.execute(&ctx, &store, &config);
    }

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Snapshot(_) => "SNAPSHOT_ERROR",
        CommandError::Request(_) => "REQUEST_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::Request(_) | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Snapshot(_) | CommandError::Config(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reminders_query_rs::filter::FilterError;
    use reminders_query_rs::SnapshotStoreError;

    #[test]
    fn test_error_codes() {
        let filter = CommandError::Filter(FilterError::EmptyExpression);
        assert_eq!(error_code(&filter), "FILTER_ERROR");
        assert_eq!(exit_status(&filter), 1);

        let request = CommandError::Request("bad".to_string());
        assert_eq!(error_code(&request), "REQUEST_ERROR");
        assert_eq!(exit_status(&request), 1);

        let config = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config), "CONFIG_ERROR");
        assert_eq!(exit_status(&config), 5);

        let io = CommandError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(error_code(&io), "IO_ERROR");
        assert_eq!(exit_status(&io), 3);
    }

    #[test]
    fn test_snapshot_errors_exit_5() {
        let missing = CommandError::Snapshot(SnapshotStoreError::NoCacheDir);
        assert_eq!(error_code(&missing), "SNAPSHOT_ERROR");
        assert_eq!(exit_status(&missing), 5);
    }
}
