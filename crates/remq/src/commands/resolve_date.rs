//! Resolve-date command implementation.
//!
//! Shows the instant a date literal resolves to, the same way search clauses
//! resolve their operands.

use chrono::{DateTime, SecondsFormat, Utc};
use reminders_query_rs::{resolve_date, QueryContext};
use serde::Serialize;

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::cli::ClockArgs;
use crate::clock::query_context;

/// JSON output structure for the resolve-date command.
#[derive(Debug, Serialize)]
struct ResolvedOutput<'a> {
    literal: &'a str,
    resolved: String,
    local: String,
    now: String,
}

/// Executes the resolve-date command.
///
/// # Errors
///
/// Returns a request error if the literal cannot be resolved.
pub fn execute(ctx: &CommandContext, literal: &str, clock: &ClockArgs) -> Result<()> {
    let config = load_config()?;
    let context = query_context(clock, &config)?;
    let resolved = resolve(literal, &context)?;

    if ctx.json_output {
        let output = ResolvedOutput {
            literal,
            resolved: resolved.to_rfc3339_opts(SecondsFormat::Secs, true),
            local: local_rfc3339(resolved, &context),
            now: context.now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{}", local_rfc3339(resolved, &context));
    }

    Ok(())
}

fn resolve(literal: &str, context: &QueryContext) -> Result<DateTime<Utc>> {
    resolve_date(literal, context)
        .ok_or_else(|| CommandError::Request(format!("cannot resolve date '{}'", literal)))
}

fn local_rfc3339(instant: DateTime<Utc>, context: &QueryContext) -> String {
    context
        .to_local(instant)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
