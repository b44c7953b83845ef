//! The record entity queried by the search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PriorityBucket;

/// A reminder as seen by the query engine.
///
/// Records are immutable inputs: the store collaborator resolves the priority
/// bucket and tag set before a record ever reaches a query.
///
/// # Example
///
/// ```
/// use reminders_model_rs::models::{PriorityBucket, Record};
///
/// let record = Record::new("r-1", "Buy milk")
///     .with_list("Groceries")
///     .with_priority(PriorityBucket::High)
///     .with_tags(["errands"]);
///
/// assert_eq!(record.list_name, "Groceries");
/// assert!(!record.has_due_date());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier, used by callers to re-fetch the full reminder.
    pub id: String,

    /// Reminder title.
    pub title: String,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Name of the list containing the reminder.
    #[serde(default)]
    pub list_name: String,

    /// Identifier of the list containing the reminder.
    #[serde(default)]
    pub list_id: String,

    /// Coarse priority label.
    #[serde(default, alias = "priority")]
    pub priority_bucket: PriorityBucket,

    /// When the reminder is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// When the reminder was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the reminder was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the reminder is completed.
    #[serde(default, alias = "isCompleted")]
    pub completed: bool,

    /// Tags attached to the reminder.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record {
    /// Creates a record with the given ID and title and every other field empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            notes: None,
            list_name: String::new(),
            list_id: String::new(),
            priority_bucket: PriorityBucket::None,
            due_date: None,
            created_at: None,
            updated_at: None,
            completed: false,
            tags: Vec::new(),
        }
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the list name. The list ID defaults to the same value if unset.
    pub fn with_list(mut self, list_name: impl Into<String>) -> Self {
        self.list_name = list_name.into();
        if self.list_id.is_empty() {
            self.list_id = self.list_name.clone();
        }
        self
    }

    /// Sets the list ID.
    pub fn with_list_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = list_id.into();
        self
    }

    /// Sets the priority bucket.
    pub fn with_priority(mut self, priority: PriorityBucket) -> Self {
        self.priority_bucket = priority;
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created_at = Some(created);
        self
    }

    /// Sets the modification timestamp.
    pub fn with_updated_at(mut self, updated: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated);
        self
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Replaces the tag set.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the record has a due date.
    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    /// Returns true if the record has non-blank notes.
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Returns the notes, or an empty string when there are none.
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}
