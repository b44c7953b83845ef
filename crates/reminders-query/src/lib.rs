//! Search engine for reminder snapshots.
//!
//! This crate answers one kind of question: given a snapshot of reminder
//! records, which of them match a request, in what order, in which groups,
//! and which page of them should be returned.
//!
//! The pipeline is pure and synchronous. The reference instant used for
//! relative dates travels in a [`QueryContext`]; nothing here reads the clock.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use reminders_model_rs::models::{PriorityBucket, Record};
//! use reminders_query_rs::filter::parse_filter;
//! use reminders_query_rs::{QueryContext, QueryEngine, SearchRequest};
//!
//! let records = vec![
//!     Record::new("1", "Buy milk")
//!         .with_priority(PriorityBucket::High)
//!         .with_due_date(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()),
//!     Record::new("2", "Buy eggs").with_priority(PriorityBucket::Low),
//! ];
//!
//! let context = QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap());
//! let request = SearchRequest::new()
//!     .with_logic(parse_filter("priority = high AND dueDate before next week").unwrap());
//!
//! let response = QueryEngine::new(context).run(records, &request);
//! assert_eq!(response.total_count, 1);
//! assert_eq!(response.records[0].id, "1");
//! ```

pub mod ast;
pub mod clause;
pub mod context;
pub mod dates;
pub mod engine;
pub mod evaluator;
pub mod filter;
pub mod group;
pub mod paginate;
pub mod request;
pub mod sort;
pub mod store;
pub mod value;

pub use ast::{FieldKind, LogicNode, Operator, SearchClause, SearchField};
pub use clause::evaluate_clause;
pub use context::{Calendar, QueryContext};
pub use dates::resolve_date;
pub use engine::QueryEngine;
pub use evaluator::{evaluate, LogicEvaluator};
pub use group::group_records;
pub use paginate::{paginate, Page};
pub use request::{
    Granularity, GroupField, SearchGroup, SearchGrouping, SearchPagination, SearchRequest,
    SearchResponse, SearchSortDescriptor, SortDirection, SortField,
};
pub use sort::sort_records;
pub use store::{ListSummary, SnapshotResult, SnapshotStore, SnapshotStoreError};
pub use value::SearchValue;
