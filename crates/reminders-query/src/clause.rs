//! Clause evaluation against a single record.
//!
//! Each field is compared according to its [`FieldKind`]. Evaluation is
//! total: a missing value, an unparsable date operand, an invalid pattern or
//! an operator that makes no sense for the field all produce a boolean
//! rather than an error.

use chrono::{DateTime, Utc};
use log::debug;
use regex::{Regex, RegexBuilder};
use reminders_model_rs::models::Record;

use crate::ast::{FieldKind, Operator, SearchClause, SearchField};
use crate::context::QueryContext;
use crate::dates::resolve_date;
use crate::value::SearchValue;

/// Two instants closer than this are considered equal.
const DATE_EQUALITY_TOLERANCE_MS: i64 = 1000;

/// Evaluates one clause against one record.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reminders_model_rs::models::Record;
/// use reminders_query_rs::{evaluate_clause, Operator, QueryContext, SearchClause, SearchField};
///
/// let context = QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap());
/// let record = Record::new("1", "Buy milk");
///
/// let clause = SearchClause::new(SearchField::Title, Operator::Like, "buy *");
/// assert!(evaluate_clause(&clause, &record, &context));
/// ```
pub fn evaluate_clause(clause: &SearchClause, record: &Record, context: &QueryContext) -> bool {
    let operand = clause.value.as_ref().unwrap_or(&SearchValue::Null);

    match clause.field.kind() {
        FieldKind::String => evaluate_string(clause.op, &string_value(clause.field, record), operand),
        FieldKind::Bool => evaluate_bool(clause.op, bool_value(clause.field, record), operand),
        FieldKind::Date => {
            evaluate_date(clause.op, date_value(clause.field, record), operand, context)
        }
        FieldKind::Collection => evaluate_tags(clause.op, &record.tags, operand),
    }
}

fn string_value(field: SearchField, record: &Record) -> String {
    match field {
        SearchField::Title => record.title.clone(),
        SearchField::Notes => record.notes_or_empty().to_string(),
        SearchField::List => record.list_name.clone(),
        SearchField::ListId => record.list_id.clone(),
        SearchField::Priority => record.priority_bucket.as_str().to_string(),
        _ => String::new(),
    }
}

fn bool_value(field: SearchField, record: &Record) -> bool {
    match field {
        SearchField::Completed => record.completed,
        SearchField::HasDueDate => record.has_due_date(),
        SearchField::HasNotes => record.has_notes(),
        _ => false,
    }
}

fn date_value(field: SearchField, record: &Record) -> Option<DateTime<Utc>> {
    match field {
        SearchField::DueDate => record.due_date,
        SearchField::CreatedAt => record.created_at,
        SearchField::UpdatedAt => record.updated_at,
        _ => None,
    }
}

fn evaluate_string(op: Operator, actual: &str, operand: &SearchValue) -> bool {
    let actual_lower = actual.to_lowercase();
    let expected = operand.as_string();

    match op {
        Operator::Equals => actual_lower == expected.to_lowercase(),
        Operator::NotEquals => actual_lower != expected.to_lowercase(),
        Operator::Contains => actual_lower.contains(&expected.to_lowercase()),
        Operator::NotContains => !actual_lower.contains(&expected.to_lowercase()),
        Operator::Like => compile_pattern(&expected, true).is_some_and(|re| re.is_match(actual)),
        Operator::NotLike => compile_pattern(&expected, true).map_or(true, |re| !re.is_match(actual)),
        Operator::Matches => compile_pattern(&expected, false).is_some_and(|re| re.is_match(actual)),
        Operator::NotMatches => {
            compile_pattern(&expected, false).map_or(true, |re| !re.is_match(actual))
        }
        Operator::In => contains_ignore_case(&operand.as_string_array(), actual),
        Operator::NotIn => !contains_ignore_case(&operand.as_string_array(), actual),
        Operator::Exists => !actual.is_empty(),
        Operator::NotExists => actual.is_empty(),
        _ => false,
    }
}

fn evaluate_bool(op: Operator, actual: bool, operand: &SearchValue) -> bool {
    match op {
        Operator::Equals => actual == operand.as_bool(),
        Operator::NotEquals => actual != operand.as_bool(),
        Operator::Exists => true,
        Operator::NotExists => false,
        _ => false,
    }
}

fn evaluate_date(
    op: Operator,
    actual: Option<DateTime<Utc>>,
    operand: &SearchValue,
    context: &QueryContext,
) -> bool {
    let Some(actual) = actual else {
        return op == Operator::NotExists;
    };

    match op {
        Operator::Exists => return true,
        Operator::NotExists => return false,
        _ => {}
    }

    let literal = operand.as_string();
    let Some(target) = resolve_date(&literal, context) else {
        debug!("unparsable date operand '{literal}' for {op}; clause is false");
        return false;
    };

    let distance_ms = (actual - target).num_milliseconds().abs();
    match op {
        Operator::Before | Operator::LessThan => actual < target,
        Operator::After | Operator::GreaterThan => actual > target,
        Operator::GreaterOrEqual => actual >= target,
        Operator::LessOrEqual => actual <= target,
        Operator::Equals => distance_ms < DATE_EQUALITY_TOLERANCE_MS,
        Operator::NotEquals => distance_ms >= DATE_EQUALITY_TOLERANCE_MS,
        _ => false,
    }
}

fn evaluate_tags(op: Operator, tags: &[String], operand: &SearchValue) -> bool {
    match op {
        Operator::Includes => contains_ignore_case(tags, &operand.as_string()),
        Operator::Excludes => !contains_ignore_case(tags, &operand.as_string()),
        Operator::In => operand
            .as_string_array()
            .iter()
            .any(|wanted| contains_ignore_case(tags, wanted)),
        Operator::NotIn => !operand
            .as_string_array()
            .iter()
            .any(|wanted| contains_ignore_case(tags, wanted)),
        Operator::Exists => !tags.is_empty(),
        Operator::NotExists => tags.is_empty(),
        _ => contains_ignore_case(tags, &operand.as_string()),
    }
}

/// Case-insensitive membership test.
fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystack.iter().any(|item| item.to_lowercase() == needle)
}

/// Compiles a `like` wildcard or a `matches` regex, case-insensitively.
fn compile_pattern(pattern: &str, wildcard: bool) -> Option<Regex> {
    let source = if wildcard {
        wildcard_to_regex(pattern)
    } else {
        pattern.to_string()
    };

    match RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(wildcard)
        .build()
    {
        Ok(re) => Some(re),
        Err(err) => {
            debug!("invalid pattern '{pattern}': {err}");
            None
        }
    }
}

/// Translates a wildcard pattern into an anchored regular expression.
///
/// `*` matches any run of characters and `?` exactly one; everything else is
/// matched literally.
///
/// # Example
///
/// ```
/// use reminders_query_rs::clause::wildcard_to_regex;
///
/// assert_eq!(wildcard_to_regex("a*b?.txt"), r"^a.*b.\.txt$");
/// ```
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 2);
    source.push('^');
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    source.push('$');
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reminders_model_rs::models::PriorityBucket;

    fn context() -> QueryContext {
        QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap())
    }

    fn record() -> Record {
        Record::new("1", "Buy milk")
            .with_notes("Semi-skimmed, 2L")
            .with_list("Groceries")
            .with_list_id("L-1")
            .with_priority(PriorityBucket::High)
            .with_tags(["Errands", "home"])
    }

    fn check(field: SearchField, op: Operator, value: impl Into<SearchValue>) -> bool {
        evaluate_clause(&SearchClause::new(field, op, value), &record(), &context())
    }

    fn check_unary(field: SearchField, op: Operator) -> bool {
        evaluate_clause(&SearchClause::unary(field, op), &record(), &context())
    }

    // ==================== Wildcards ====================

    #[test]
    fn test_wildcard_to_regex_escapes_literals() {
        assert_eq!(wildcard_to_regex("a+b"), r"^a\+b$");
        assert_eq!(wildcard_to_regex("(x)*"), r"^\(x\).*$");
        assert_eq!(wildcard_to_regex(""), "^$");
    }

    // ==================== String Fields ====================

    #[test]
    fn test_string_equals_case_insensitive() {
        assert!(check(SearchField::Title, Operator::Equals, "BUY MILK"));
        assert!(!check(SearchField::Title, Operator::Equals, "Buy"));
        assert!(check(SearchField::Title, Operator::NotEquals, "Buy"));
    }

    #[test]
    fn test_string_contains() {
        assert!(check(SearchField::Notes, Operator::Contains, "SKIMMED"));
        assert!(!check(SearchField::Notes, Operator::Contains, "whole"));
        assert!(check(SearchField::Notes, Operator::NotContains, "whole"));
    }

    #[test]
    fn test_string_like_is_anchored() {
        assert!(check(SearchField::Title, Operator::Like, "buy*"));
        assert!(check(SearchField::Title, Operator::Like, "Buy mil?"));
        assert!(!check(SearchField::Title, Operator::Like, "milk"));
        assert!(!check(SearchField::Title, Operator::Like, "Buy mi?"));
        assert!(check(SearchField::Title, Operator::NotLike, "milk"));
    }

    #[test]
    fn test_string_like_treats_regex_chars_literally() {
        assert!(!check(SearchField::Title, Operator::Like, "Buy.milk"));
        assert!(check(SearchField::Notes, Operator::Like, "semi-skimmed, 2?"));
    }

    #[test]
    fn test_string_matches_is_unanchored() {
        assert!(check(SearchField::Title, Operator::Matches, "m[aeiou]lk"));
        assert!(check(SearchField::Title, Operator::Matches, "^BUY"));
        assert!(!check(SearchField::Title, Operator::Matches, "^milk"));
        assert!(check(SearchField::Title, Operator::NotMatches, "^milk"));
    }

    #[test]
    fn test_invalid_regex_fails_closed_and_negation_opens() {
        assert!(!check(SearchField::Title, Operator::Matches, "(unclosed"));
        assert!(check(SearchField::Title, Operator::NotMatches, "(unclosed"));
    }

    #[test]
    fn test_string_in() {
        assert!(check(SearchField::List, Operator::In, "work, groceries"));
        assert!(check(SearchField::List, Operator::In, vec!["Home", "GROCERIES"]));
        assert!(!check(SearchField::List, Operator::In, "work"));
        assert!(check(SearchField::List, Operator::NotIn, "work"));
    }

    #[test]
    fn test_string_exists() {
        assert!(check_unary(SearchField::Notes, Operator::Exists));
        let bare = Record::new("2", "x");
        let clause = SearchClause::unary(SearchField::Notes, Operator::NotExists);
        assert!(evaluate_clause(&clause, &bare, &context()));
    }

    #[test]
    fn test_priority_compares_bucket_name() {
        assert!(check(SearchField::Priority, Operator::Equals, "high"));
        assert!(check(SearchField::Priority, Operator::In, "medium,high"));
        assert!(!check(SearchField::Priority, Operator::Equals, "low"));
    }

    #[test]
    fn test_list_id() {
        assert!(check(SearchField::ListId, Operator::Equals, "l-1"));
    }

    #[test]
    fn test_string_unsupported_operator_is_false() {
        assert!(!check(SearchField::Title, Operator::Before, "today"));
        assert!(!check(SearchField::Title, Operator::Includes, "milk"));
    }

    // ==================== Boolean Fields ====================

    #[test]
    fn test_bool_equals() {
        assert!(check(SearchField::Completed, Operator::Equals, false));
        assert!(check(SearchField::Completed, Operator::Equals, "false"));
        assert!(check(SearchField::HasNotes, Operator::Equals, "true"));
        assert!(check(SearchField::HasNotes, Operator::Equals, 1i64));
        assert!(check(SearchField::HasDueDate, Operator::NotEquals, true));
    }

    #[test]
    fn test_bool_exists_always() {
        assert!(check_unary(SearchField::Completed, Operator::Exists));
        assert!(!check_unary(SearchField::Completed, Operator::NotExists));
    }

    #[test]
    fn test_bool_unsupported_operator_is_false() {
        assert!(!check(SearchField::Completed, Operator::Contains, "t"));
    }

    // ==================== Date Fields ====================

    fn dated(due: DateTime<Utc>) -> Record {
        Record::new("d", "dated").with_due_date(due)
    }

    fn check_date(record: &Record, op: Operator, value: &str) -> bool {
        let clause = SearchClause::new(SearchField::DueDate, op, value);
        evaluate_clause(&clause, record, &context())
    }

    #[test]
    fn test_missing_date_only_matches_not_exists() {
        let record = Record::new("1", "undated");
        for op in Operator::ALL {
            let clause = SearchClause::new(SearchField::DueDate, op, "today");
            assert_eq!(
                evaluate_clause(&clause, &record, &context()),
                op == Operator::NotExists,
                "operator {op}"
            );
        }
    }

    #[test]
    fn test_date_comparisons() {
        let record = dated(Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap());

        assert!(check_date(&record, Operator::After, "tomorrow"));
        assert!(check_date(&record, Operator::GreaterThan, "2025-01-09"));
        assert!(check_date(&record, Operator::Before, "next week"));
        assert!(check_date(&record, Operator::LessThan, "2025-01-11"));
        assert!(!check_date(&record, Operator::Before, "today"));
    }

    #[test]
    fn test_date_inclusive_bounds() {
        let record = dated(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap());

        assert!(check_date(&record, Operator::GreaterOrEqual, "tomorrow"));
        assert!(check_date(&record, Operator::LessOrEqual, "tomorrow"));
        assert!(!check_date(&record, Operator::After, "tomorrow"));
        assert!(!check_date(&record, Operator::Before, "tomorrow"));
    }

    #[test]
    fn test_date_equals_within_one_second() {
        let record = dated(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap());

        assert!(check_date(&record, Operator::Equals, "2025-01-09T00:00:00.900Z"));
        assert!(!check_date(&record, Operator::Equals, "2025-01-09T00:00:01Z"));
        assert!(check_date(&record, Operator::NotEquals, "2025-01-09T00:00:01Z"));
        assert!(!check_date(&record, Operator::NotEquals, "tomorrow"));
    }

    #[test]
    fn test_date_exists() {
        let record = dated(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap());
        assert!(evaluate_clause(
            &SearchClause::unary(SearchField::DueDate, Operator::Exists),
            &record,
            &context()
        ));
        assert!(!evaluate_clause(
            &SearchClause::unary(SearchField::DueDate, Operator::NotExists),
            &record,
            &context()
        ));
    }

    #[test]
    fn test_unparsable_date_fails_closed() {
        let record = dated(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap());
        assert!(!check_date(&record, Operator::Before, "someday"));
        assert!(!check_date(&record, Operator::After, "someday"));
        assert!(!check_date(&record, Operator::NotEquals, "someday"));
    }

    #[test]
    fn test_created_and_updated_at() {
        let record = Record::new("1", "x")
            .with_created_at(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap())
            .with_updated_at(Utc.with_ymd_and_hms(2025, 1, 8, 11, 0, 0).unwrap());

        let created = SearchClause::new(SearchField::CreatedAt, Operator::Before, "last month");
        assert!(evaluate_clause(&created, &record, &context()));

        let updated = SearchClause::new(SearchField::UpdatedAt, Operator::After, "today");
        assert!(evaluate_clause(&updated, &record, &context()));
    }

    // ==================== Tags ====================

    #[test]
    fn test_tag_includes_excludes() {
        assert!(check(SearchField::Tag, Operator::Includes, "errands"));
        assert!(!check(SearchField::Tag, Operator::Includes, "work"));
        assert!(check(SearchField::Tag, Operator::Excludes, "work"));
        assert!(!check(SearchField::Tag, Operator::Excludes, "HOME"));
    }

    #[test]
    fn test_tag_in_not_in() {
        assert!(check(SearchField::Tag, Operator::In, "work,home"));
        assert!(!check(SearchField::Tag, Operator::In, vec!["work", "gym"]));
        assert!(check(SearchField::Tag, Operator::NotIn, vec!["work", "gym"]));
    }

    #[test]
    fn test_tag_exists() {
        assert!(check_unary(SearchField::Tag, Operator::Exists));
        let bare = Record::new("2", "x");
        let clause = SearchClause::unary(SearchField::Tag, Operator::NotExists);
        assert!(evaluate_clause(&clause, &bare, &context()));
    }

    #[test]
    fn test_tag_fallback_is_membership() {
        assert!(check(SearchField::Tag, Operator::Equals, "Home"));
        assert!(check(SearchField::Tag, Operator::Contains, "errands"));
        assert!(!check(SearchField::Tag, Operator::Contains, "err"));
    }
}
