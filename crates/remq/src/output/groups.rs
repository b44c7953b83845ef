//! Group tree output formatting.

use owo_colors::OwoColorize;
use reminders_query_rs::SearchGroup;

/// Formats groups as an indented tree with counts.
pub fn format_groups_table(groups: &[SearchGroup], use_colors: bool) -> String {
    if groups.is_empty() {
        return "No groups.\n".to_string();
    }

    let mut output = String::new();
    push_level(&mut output, groups, 0, use_colors);
    output
}

fn push_level(output: &mut String, groups: &[SearchGroup], depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    for group in groups {
        let label = format!("{}: {}", group.field, group.value);
        let label = if use_colors && depth == 0 {
            label.bold().to_string()
        } else {
            label
        };
        output.push_str(&format!("{indent}{label} ({})\n", group.count));

        if let Some(children) = &group.children {
            push_level(output, children, depth + 1, use_colors);
        }
    }
}
