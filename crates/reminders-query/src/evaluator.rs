//! Logic tree evaluation against records.
//!
//! This module provides the [`LogicEvaluator`] for evaluating a [`LogicNode`]
//! against reminder records.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use reminders_model_rs::models::{PriorityBucket, Record};
//! use reminders_query_rs::{
//!     LogicEvaluator, LogicNode, Operator, QueryContext, SearchClause, SearchField,
//! };
//!
//! let context = QueryContext::utc(Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap());
//! let node = LogicNode::any(vec![
//!     LogicNode::clause(SearchClause::new(SearchField::Priority, Operator::Equals, "high")),
//!     LogicNode::clause(SearchClause::new(SearchField::Tag, Operator::Includes, "urgent")),
//! ]);
//!
//! let records = vec![
//!     Record::new("1", "File taxes").with_priority(PriorityBucket::High),
//!     Record::new("2", "Water plants"),
//! ];
//!
//! let evaluator = LogicEvaluator::new(&node, &context);
//! let matches = evaluator.filter_records(&records);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].id, "1");
//! ```

use reminders_model_rs::models::Record;

use crate::ast::LogicNode;
use crate::clause::evaluate_clause;
use crate::context::QueryContext;

/// Evaluates a logic tree against records.
///
/// The evaluator borrows the tree and the context, and can test any number
/// of records against them.
#[derive(Debug)]
pub struct LogicEvaluator<'a> {
    node: &'a LogicNode,
    context: &'a QueryContext,
}

impl<'a> LogicEvaluator<'a> {
    /// Creates a new evaluator.
    pub fn new(node: &'a LogicNode, context: &'a QueryContext) -> Self {
        Self { node, context }
    }

    /// Returns true if the record satisfies the tree.
    pub fn matches(&self, record: &Record) -> bool {
        evaluate(self.node, record, self.context)
    }

    /// Filters a slice of records, returning only those that match.
    pub fn filter_records<'b>(&self, records: &'b [Record]) -> Vec<&'b Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Evaluates a logic node against a record.
///
/// An empty node is true. Otherwise every populated branch is evaluated and
/// the results are combined with AND:
///
/// - `clause`: the clause result
/// - `all`: every child holds (an empty list holds)
/// - `any`: at least one child holds (an empty list does not)
/// - `xor`: exactly one child holds
/// - `not`: the child does not hold
pub fn evaluate(node: &LogicNode, record: &Record, context: &QueryContext) -> bool {
    if node.is_empty() {
        return true;
    }

    if let Some(clause) = &node.clause {
        if !evaluate_clause(clause, record, context) {
            return false;
        }
    }

    if let Some(children) = &node.all {
        if !children.iter().all(|child| evaluate(child, record, context)) {
            return false;
        }
    }

    if let Some(children) = &node.any {
        if !children.iter().any(|child| evaluate(child, record, context)) {
            return false;
        }
    }

    if let Some(children) = &node.xor {
        let holding = children
            .iter()
            .filter(|child| evaluate(child, record, context))
            .take(2)
            .count();
        if holding != 1 {
            return false;
        }
    }

    if let Some(inner) = &node.not {
        if evaluate(inner, record, context) {
            return false;
        }
    }

    true
}
