//! Hierarchical grouping of records into named buckets.

use chrono::Datelike;
use reminders_model_rs::models::{normalize_tags, Record};

use crate::context::QueryContext;
use crate::request::{Granularity, GroupField, SearchGroup, SearchGrouping};

/// Bucket for records with no tags.
pub const NO_TAGS_BUCKET: &str = "<none>";

/// Bucket for records with no due date.
pub const NO_DATE_BUCKET: &str = "none";

/// Partitions records by the first grouping, then each bucket by the rest.
///
/// Buckets are ordered by key, ignoring case. A record lands in exactly one
/// bucket per level, except for tag grouping where it lands in one bucket per
/// distinct tag (ignoring case). A bucket's `children` is `None` at the last level.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reminders_model_rs::models::{PriorityBucket, Record};
/// use reminders_query_rs::{group_records, GroupField, QueryContext, SearchGrouping};
///
/// let context = QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap());
/// let records = vec![
///     Record::new("1", "A").with_priority(PriorityBucket::Low),
///     Record::new("2", "B").with_priority(PriorityBucket::High),
///     Record::new("3", "C").with_priority(PriorityBucket::High),
/// ];
///
/// let groups = group_records(&records, &[SearchGrouping::new(GroupField::Priority)], &context);
/// assert_eq!(groups[0].value, "high");
/// assert_eq!(groups[0].count, 2);
/// assert_eq!(groups[1].value, "low");
/// ```
pub fn group_records(
    records: &[Record],
    groupings: &[SearchGrouping],
    context: &QueryContext,
) -> Vec<SearchGroup> {
    group_level(records.iter().collect(), groupings, 0, context)
}

fn group_level(
    records: Vec<&Record>,
    groupings: &[SearchGrouping],
    level: usize,
    context: &QueryContext,
) -> Vec<SearchGroup> {
    let Some(grouping) = groupings.get(level) else {
        return Vec::new();
    };

    let mut buckets: Vec<(String, Vec<&Record>)> = Vec::new();
    for record in records {
        for key in bucket_keys(record, grouping, context) {
            match buckets.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, members)) => members.push(record),
                None => buckets.push((key, vec![record])),
            }
        }
    }
    buckets.sort_by_cached_key(|(key, _)| key.to_lowercase());

    buckets
        .into_iter()
        .map(|(value, members)| {
            let member_ids = members.iter().map(|record| record.id.clone()).collect();
            let count = members.len();
            let children = group_level(members, groupings, level + 1, context);
            SearchGroup {
                field: grouping.field.as_str().to_string(),
                value,
                count,
                member_ids,
                children: (!children.is_empty()).then_some(children),
            }
        })
        .collect()
}

fn bucket_keys(record: &Record, grouping: &SearchGrouping, context: &QueryContext) -> Vec<String> {
    match grouping.field {
        GroupField::Priority => vec![record.priority_bucket.as_str().to_string()],
        GroupField::List => vec![record.list_name.clone()],
        GroupField::Tag => {
            let tags = normalize_tags(record.tags.clone());
            if tags.is_empty() {
                vec![NO_TAGS_BUCKET.to_string()]
            } else {
                tags
            }
        }
        GroupField::DueDate => vec![date_label(
            record,
            grouping.granularity.unwrap_or_default(),
            context,
        )],
    }
}

fn date_label(record: &Record, granularity: Granularity, context: &QueryContext) -> String {
    let Some(due) = record.due_date else {
        return NO_DATE_BUCKET.to_string();
    };
    let local = context.to_local(due);

    match granularity {
        Granularity::Day => local.format("%b %-d, %Y").to_string(),
        Granularity::Week => {
            let week = local.iso_week();
            format!("Week {}, {}", week.week(), week.year())
        }
        Granularity::Month => local.format("%B %Y").to_string(),
    }
}
