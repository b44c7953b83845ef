//! Reminder payloads as returned by the reminders server.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PriorityBucket, Record};
use crate::error::{ModelError, ModelResult};

/// Priority as sent by the server: either a numeric level or a bucket name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPriority {
    /// Numeric level (0 = none, 1 = most urgent, 9 = least urgent).
    Level(i64),
    /// Bucket name such as `"high"`.
    Name(String),
}

impl RawPriority {
    /// Resolves the raw value into a bucket.
    pub fn bucket(&self) -> ModelResult<PriorityBucket> {
        match self {
            RawPriority::Level(level) => Ok(PriorityBucket::from_level(*level)),
            RawPriority::Name(name) => name.parse(),
        }
    }
}

/// A reminder exactly as listed by `GET /lists/{list_name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReminder {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: String,

    /// Reminder title.
    #[serde(default)]
    pub title: String,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// List name, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,

    /// List identifier, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,

    /// Priority level or bucket name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<RawPriority>,

    /// ISO-8601 due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// ISO-8601 creation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// ISO-8601 modification date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Whether the reminder is completed.
    #[serde(default)]
    pub is_completed: bool,

    /// Tags attached to the reminder.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawReminder {
    /// Converts the payload into a [`Record`].
    ///
    /// `list_name` is used when the payload does not name its own list, which
    /// is the case for per-list listings.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MissingId` for reminders without an ID,
    /// `ModelError::InvalidPriority` for unknown bucket names, and
    /// `ModelError::InvalidDate` for malformed timestamps.
    pub fn into_record(self, list_name: &str) -> ModelResult<Record> {
        if self.id.trim().is_empty() {
            return Err(ModelError::MissingId);
        }

        let priority_bucket = match &self.priority {
            Some(raw) => raw.bucket()?,
            None => PriorityBucket::None,
        };

        let due_date = parse_optional_date(&self.id, "dueDate", self.due_date.as_deref())?;
        let created_at = parse_optional_date(&self.id, "createdAt", self.created_at.as_deref())?;
        let updated_at = parse_optional_date(&self.id, "updatedAt", self.updated_at.as_deref())?;

        let list_name = self
            .list_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| list_name.to_string());
        let list_id = self
            .list_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| list_name.clone());

        Ok(Record {
            id: self.id,
            title: self.title,
            notes: self.notes.filter(|n| !n.is_empty()),
            list_name,
            list_id,
            priority_bucket,
            due_date,
            created_at,
            updated_at,
            completed: self.is_completed,
            tags: normalize_tags(self.tags),
        })
    }
}

/// Trims tags, drops empty ones and removes case-insensitive duplicates.
///
/// The first spelling of a duplicated tag wins.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    let mut result = Vec::with_capacity(tags.len());

    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        result.push(trimmed.to_string());
    }

    result
}

/// Parses a server timestamp.
///
/// Accepts RFC 3339 (with `Z` or an explicit offset), naive date-times which
/// are taken as UTC, and bare dates which become midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_optional_date(
    id: &str,
    field: &'static str,
    value: Option<&str>,
) -> ModelResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| ModelError::invalid_date(id, field, raw)),
    }
}
