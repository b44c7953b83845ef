//! The search pipeline.

use log::debug;
use reminders_model_rs::models::Record;

use crate::context::QueryContext;
use crate::evaluator::LogicEvaluator;
use crate::group::group_records;
use crate::paginate::paginate;
use crate::request::{SearchRequest, SearchResponse};
use crate::sort::sort_records;

/// Runs search requests against record snapshots.
///
/// Each run filters by the request's logic tree and free-text query, sorts,
/// groups the full filtered set and finally cuts out the requested page.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reminders_model_rs::models::{PriorityBucket, Record};
/// use reminders_query_rs::{QueryContext, QueryEngine, SearchRequest};
///
/// let engine = QueryEngine::new(QueryContext::utc(
///     Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap(),
/// ));
/// let records = vec![
///     Record::new("1", "Buy milk").with_priority(PriorityBucket::High),
///     Record::new("2", "Buy eggs").with_priority(PriorityBucket::Low),
/// ];
///
/// let response = engine.run(records, &SearchRequest::new().with_query("MILK"));
/// assert_eq!(response.total_count, 1);
/// assert_eq!(response.records[0].id, "1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    context: QueryContext,
}

impl QueryEngine {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }

    /// Answers `request` over `records`.
    ///
    /// Selectors meant for the snapshot store (`includeCompleted`, `lists`)
    /// are not applied here.
    pub fn run(&self, records: Vec<Record>, request: &SearchRequest) -> SearchResponse {
        let snapshot_size = records.len();

        let mut matched: Vec<Record> = match &request.logic {
            Some(logic) if !logic.is_empty() => {
                let evaluator = LogicEvaluator::new(logic, &self.context);
                records
                    .into_iter()
                    .filter(|record| evaluator.matches(record))
                    .collect()
            }
            _ => records,
        };

        if let Some(query) = request.query.as_deref().map(str::trim) {
            if !query.is_empty() {
                let needle = query.to_lowercase();
                matched.retain(|record| matches_query(record, &needle));
            }
        }
        debug!("Filtered {} of {} records", matched.len(), snapshot_size);

        if let Some(sort) = &request.sort {
            sort_records(&mut matched, sort);
        }

        let groups = request
            .group_by
            .as_deref()
            .filter(|group_by| !group_by.is_empty())
            .map(|group_by| group_records(&matched, group_by, &self.context));
        if let Some(groups) = &groups {
            debug!("Built {} top-level groups", groups.len());
        }

        let pagination = request.pagination.unwrap_or_default();
        let page = paginate(matched, &pagination);
        debug!(
            "Returning {} of {} records (has_more: {})",
            page.returned_count, page.total_count, page.has_more
        );

        SearchResponse {
            records: page.items,
            total_count: page.total_count,
            returned_count: page.returned_count,
            has_more: page.has_more,
            limit: pagination.limit,
            offset: pagination.offset,
            groups,
        }
    }
}

/// Case-insensitive substring match over title and notes. `needle` must already be lowercase.
fn matches_query(record: &Record, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record
            .notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains(needle))
}
