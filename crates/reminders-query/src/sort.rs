//! Multi-key record sorting.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use reminders_model_rs::models::Record;

use crate::request::{SearchSortDescriptor, SortDirection, SortField};

/// Stably sorts records by each descriptor in turn.
///
/// The first descriptor that tells two records apart decides their order;
/// records that tie on every descriptor keep their input order. Records
/// without a date sort after dated records for that key in both directions.
pub fn sort_records(records: &mut [Record], descriptors: &[SearchSortDescriptor]) {
    if descriptors.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        descriptors
            .iter()
            .map(|descriptor| compare_by(a, b, descriptor))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_by(a: &Record, b: &Record, descriptor: &SearchSortDescriptor) -> Ordering {
    let directed = |ordering: Ordering| match descriptor.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    match descriptor.field {
        SortField::Title => directed(compare_text(&a.title, &b.title)),
        SortField::List => directed(compare_text(&a.list_name, &b.list_name)),
        SortField::Priority => directed(compare_text(
            a.priority_bucket.as_str(),
            b.priority_bucket.as_str(),
        )),
        SortField::Tag => directed(compare_text(&first_tag(a), &first_tag(b))),
        SortField::DueDate => compare_dates(a.due_date, b.due_date, directed),
        SortField::CreatedAt => compare_dates(a.created_at, b.created_at, directed),
        SortField::UpdatedAt => compare_dates(a.updated_at, b.updated_at, directed),
    }
}

/// Missing dates are greater than any date, and the direction is not applied to that rule.
fn compare_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    directed: impl Fn(Ordering) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn first_tag(record: &Record) -> String {
    record
        .tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .min()
        .unwrap_or_default()
}
