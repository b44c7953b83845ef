//! Reference time for relative dates.
//!
//! The engine never reads the clock itself; the CLI decides what "now" is
//! and which calendar it is read in.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use reminders_query_rs::QueryContext;

use crate::cli::ClockArgs;
use crate::commands::config::Config;
use crate::commands::{CommandError, Result};

/// Builds the query context for a command.
///
/// The instant is `--now` when given, the system clock otherwise. The
/// calendar is, in order of priority: `--tz`, the offset written in `--now`,
/// config `timezone`, then UTC. A named timezone stays a timezone, so every
/// instant is read with the offset in effect on its own date.
pub fn query_context(clock: &ClockArgs, config: &Config) -> Result<QueryContext> {
    let explicit = clock.now.as_deref().map(parse_now).transpose()?;
    let now_utc = explicit
        .map(|now| now.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    if let Some(name) = clock.tz.as_deref() {
        let tz = parse_timezone(name).map_err(CommandError::Request)?;
        return Ok(QueryContext::in_timezone(now_utc, tz));
    }
    if let Some(now) = explicit {
        return Ok(QueryContext::new(now));
    }
    if let Some(name) = config.timezone.as_deref() {
        let tz = parse_timezone(name).map_err(CommandError::Config)?;
        return Ok(QueryContext::in_timezone(now_utc, tz));
    }

    Ok(QueryContext::utc(now_utc))
}

fn parse_now(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| {
        CommandError::Request(format!(
            "invalid --now '{}': expected RFC 3339, e.g. 2025-01-08T12:00:00Z",
            value
        ))
    })
}

fn parse_timezone(name: &str) -> std::result::Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("unknown timezone '{}'", name))
}
