//! Common helper functions for output formatting.

use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use reminders_model_rs::models::PriorityBucket;
use reminders_query_rs::QueryContext;

/// How due dates are rendered in tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// "Today", "Tomorrow", "3 days ago", or a short date.
    #[default]
    Relative,
    /// `2025-01-10 09:00` in the local calendar.
    Iso,
    /// `Jan 10` in the local calendar.
    Short,
}

impl DateFormat {
    /// Accepted config values.
    pub const NAMES: [&'static str; 3] = ["relative", "iso", "short"];

    /// Looks a format up by config name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "relative" => Some(DateFormat::Relative),
            "iso" => Some(DateFormat::Iso),
            "short" => Some(DateFormat::Short),
            _ => None,
        }
    }
}

/// Truncates an ID to 6 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(6).collect()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a priority bucket for display.
pub fn format_priority(priority: PriorityBucket, use_colors: bool) -> String {
    let label = match priority {
        PriorityBucket::None => "-",
        other => other.as_str(),
    };

    if use_colors {
        match priority {
            PriorityBucket::High => label.red().to_string(),
            PriorityBucket::Medium => label.yellow().to_string(),
            PriorityBucket::Low => label.blue().to_string(),
            PriorityBucket::None => label.dimmed().to_string(),
        }
    } else {
        label.to_string()
    }
}

/// Formats a due date for display in the context's calendar.
///
/// Overdue dates are red and dates due later today are yellow.
pub fn format_due(
    due: Option<DateTime<Utc>>,
    context: &QueryContext,
    format: DateFormat,
    use_colors: bool,
) -> String {
    let Some(due) = due else {
        return String::new();
    };

    let local = context.to_local(due);
    let date = local.date_naive();
    let today = context.today();

    let display = match format {
        DateFormat::Iso => local.format("%Y-%m-%d %H:%M").to_string(),
        DateFormat::Short => local.format("%b %d").to_string(),
        DateFormat::Relative => {
            if date == today {
                "Today".to_string()
            } else if date == today + Duration::days(1) {
                "Tomorrow".to_string()
            } else if date == today - Duration::days(1) {
                "Yesterday".to_string()
            } else if date < today {
                format!("{} days ago", (today - date).num_days())
            } else {
                date.format("%b %d").to_string()
            }
        }
    };

    if use_colors {
        if due < context.now_utc() {
            display.red().to_string()
        } else if date == today {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn context() -> QueryContext {
        QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap())
    }

    fn due(day: u32, hour: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_date_format_from_name() {
        assert_eq!(DateFormat::from_name("ISO"), Some(DateFormat::Iso));
        assert_eq!(DateFormat::from_name("short"), Some(DateFormat::Short));
        assert_eq!(DateFormat::from_name("relative"), Some(DateFormat::Relative));
        assert_eq!(DateFormat::from_name("long"), None);
        for name in DateFormat::NAMES {
            assert!(DateFormat::from_name(name).is_some());
        }
    }

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("abcdefghij"), "abcdef");
        assert_eq!(truncate_id("abc"), "abc");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("Grocery shopping", 10), "Grocery...");
        assert_eq!(truncate_str("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_format_priority_plain() {
        assert_eq!(format_priority(PriorityBucket::High, false), "high");
        assert_eq!(format_priority(PriorityBucket::None, false), "-");
    }

    #[test]
    fn test_format_priority_colored() {
        let colored = format_priority(PriorityBucket::High, true);
        assert!(colored.contains("high"));
        assert_ne!(colored, "high");
    }

    #[test]
    fn test_format_due_relative() {
        let ctx = context();
        let fmt = |d| format_due(d, &ctx, DateFormat::Relative, false);
        assert_eq!(fmt(None), "");
        assert_eq!(fmt(due(8, 18)), "Today");
        assert_eq!(fmt(due(9, 9)), "Tomorrow");
        assert_eq!(fmt(due(7, 9)), "Yesterday");
        assert_eq!(fmt(due(3, 9)), "5 days ago");
        assert_eq!(fmt(due(20, 9)), "Jan 20");
    }

    #[test]
    fn test_format_due_iso_uses_context_offset() {
        let ctx = QueryContext::new(
            Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0)
                .unwrap()
                .with_timezone(&chrono::FixedOffset::east_opt(2 * 3600).unwrap()),
        );
        assert_eq!(
            format_due(due(8, 23), &ctx, DateFormat::Iso, false),
            "2025-01-09 01:00"
        );
        assert_eq!(format_due(due(8, 23), &ctx, DateFormat::Short, false), "Jan 09");
    }

    #[test]
    fn test_format_due_overdue_is_colored() {
        let ctx = context();
        let overdue = format_due(due(8, 9), &ctx, DateFormat::Relative, true);
        assert!(overdue.contains("Today"));
        assert_ne!(overdue, "Today");

        let future = format_due(due(20, 9), &ctx, DateFormat::Relative, true);
        assert_eq!(future, "Jan 20");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&[], 15), "");
        let tags = vec!["home".to_string(), "weekend".to_string()];
        assert_eq!(format_tags(&tags, 20), "#home #weekend");
        assert_eq!(format_tags(&tags, 10), "#home #...");
    }
}
