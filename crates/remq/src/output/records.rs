//! Search result output formatting.

use owo_colors::OwoColorize;
use reminders_model_rs::models::Record;
use reminders_query_rs::{QueryContext, SearchResponse};

use super::groups::format_groups_table;
use super::helpers::{format_due, format_priority, format_tags, truncate_id, truncate_str, DateFormat};

/// Formats a search response as JSON.
pub fn format_response_json(response: &SearchResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(response)
}

/// Formats a search response as tables: groups first, then the page of records.
pub fn format_response_table(
    response: &SearchResponse,
    context: &QueryContext,
    date_format: DateFormat,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    if let Some(groups) = &response.groups {
        output.push_str(&format_groups_table(groups, use_colors));
        output.push('\n');
    }

    output.push_str(&format_records_table(
        &response.records,
        context,
        date_format,
        use_colors,
    ));

    if let Some(footer) = page_footer(response) {
        if use_colors {
            output.push_str(&format!("{}\n", footer.dimmed()));
        } else {
            output.push_str(&footer);
            output.push('\n');
        }
    }

    output
}

/// Formats records as a table.
pub fn format_records_table(
    records: &[Record],
    context: &QueryContext,
    date_format: DateFormat,
    use_colors: bool,
) -> String {
    if records.is_empty() {
        return "No reminders found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<6} {:<16} {:<15} {:<15} {}",
        "ID", "Pri", "Due", "List", "Tags", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for record in records {
        let id_prefix = truncate_id(&record.id);
        let priority = format_priority(record.priority_bucket, use_colors);
        let due = format_due(record.due_date, context, date_format, use_colors);
        let list = truncate_str(&record.list_name, 15);
        let tags = format_tags(&record.tags, 15);
        let title = if record.completed {
            format!("[x] {}", record.title)
        } else {
            record.title.clone()
        };

        let line = format!(
            "{:<8} {:<6} {:<16} {:<15} {:<15} {}",
            id_prefix, priority, due, list, tags, title
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Describes the page window when only part of the result was returned.
fn page_footer(response: &SearchResponse) -> Option<String> {
    if response.returned_count >= response.total_count {
        return None;
    }

    let offset = usize::try_from(response.offset.unwrap_or(0).max(0)).unwrap_or(usize::MAX);
    if response.returned_count == 0 {
        return Some(format!("No reminders on this page ({} total)", response.total_count));
    }

    let first = offset.saturating_add(1);
    let last = offset.saturating_add(response.returned_count);
    let more = if response.has_more {
        " (use --offset for more)"
    } else {
        ""
    };
    Some(format!(
        "Showing {}-{} of {}{}",
        first, last, response.total_count, more
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reminders_model_rs::models::PriorityBucket;

    fn context() -> QueryContext {
        QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap())
    }

    fn response(records: Vec<Record>, total: usize, offset: Option<i64>, has_more: bool) -> SearchResponse {
        SearchResponse {
            returned_count: records.len(),
            records,
            total_count: total,
            has_more,
            limit: None,
            offset,
            groups: None,
        }
    }

    #[test]
    fn test_empty_table() {
        let output = format_records_table(&[], &context(), DateFormat::Relative, false);
        assert_eq!(output, "No reminders found.\n");
    }

    #[test]
    fn test_table_rows() {
        let records = vec![
            Record::new("abcdef123", "Buy milk")
                .with_list("Groceries")
                .with_priority(PriorityBucket::High)
                .with_tags(["errands"])
                .with_due_date(Utc.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap()),
            Record::new("2", "Old task").with_completed(true),
        ];
        let output = format_records_table(&records, &context(), DateFormat::Relative, false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("abcdef "));
        assert!(lines[1].contains("high"));
        assert!(lines[1].contains("Tomorrow"));
        assert!(lines[1].contains("Groceries"));
        assert!(lines[1].contains("#errands"));
        assert!(lines[1].ends_with("Buy milk"));
        assert!(lines[2].ends_with("[x] Old task"));
    }

    #[test]
    fn test_footer_only_for_partial_pages() {
        let records = vec![Record::new("1", "A")];
        assert_eq!(page_footer(&response(records.clone(), 1, None, false)), None);

        assert_eq!(
            page_footer(&response(records.clone(), 5, Some(2), true)).as_deref(),
            Some("Showing 3-3 of 5 (use --offset for more)")
        );
        assert_eq!(
            page_footer(&response(records, 5, Some(4), false)).as_deref(),
            Some("Showing 5-5 of 5")
        );
        assert_eq!(
            page_footer(&response(vec![], 5, Some(10), false)).as_deref(),
            Some("No reminders on this page (5 total)")
        );
    }

    #[test]
    fn test_response_json_is_camel_case() {
        let json = format_response_json(&response(vec![Record::new("1", "A")], 1, None, false)).unwrap();
        assert!(json.contains("\"totalCount\": 1"));
        assert!(json.contains("\"returnedCount\": 1"));
        assert!(!json.contains("\"groups\""));
    }
}
