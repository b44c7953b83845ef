//! Lists command implementation.
//!
//! Shows the reminder lists present in the snapshot.

use reminders_query_rs::SnapshotStore;

use super::{CommandContext, Result};
use crate::output::{format_lists_json, format_lists_table};

/// Executes the lists command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub fn execute(ctx: &CommandContext, store: &SnapshotStore) -> Result<()> {
    let lists = store.list_names()?;

    if ctx.json_output {
        println!("{}", format_lists_json(&lists)?);
    } else if !ctx.quiet {
        print!("{}", format_lists_table(&lists, ctx.use_colors));
    }

    Ok(())
}
