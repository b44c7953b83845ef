//! List summary output formatting.

use owo_colors::OwoColorize;
use reminders_query_rs::ListSummary;
use serde::Serialize;

use super::helpers::truncate_str;

/// JSON output structure for the lists command.
#[derive(Serialize)]
struct ListsOutput<'a> {
    lists: &'a [ListSummary],
    total: usize,
}

/// Formats list summaries as JSON.
pub fn format_lists_json(lists: &[ListSummary]) -> Result<String, serde_json::Error> {
    let output = ListsOutput {
        lists,
        total: lists.iter().map(|l| l.count).sum(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats list summaries as a table.
pub fn format_lists_table(lists: &[ListSummary], use_colors: bool) -> String {
    if lists.is_empty() {
        return "No lists found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<30} {:>6}", "List", "Count");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for list in lists {
        output.push_str(&format!("{:<30} {:>6}\n", truncate_str(&list.name, 30), list.count));
    }

    output
}
