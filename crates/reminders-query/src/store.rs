//! Snapshot file loading with XDG path support.
//!
//! A snapshot is the JSON dump of a reminders account that search requests
//! run against. It is stored at `~/.cache/remq/snapshot.json` by default and
//! comes in one of two shapes:
//!
//! - a flat array of records, each shaped like an entry of `records` in `remq search --json`
//! - the reminders server's per-list listing, `{"lists": {"<name>": [...]}}`

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;
use reminders_model_rs::error::ModelError;
use reminders_model_rs::models::{normalize_tags, RawReminder, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::SearchRequest;

/// Default snapshot filename.
const SNAPSHOT_FILENAME: &str = "snapshot.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "remq";

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// Failed to determine XDG cache directory.
    #[error("failed to determine cache directory: no valid home directory found")]
    NoCacheDir,

    /// I/O error during file read.
    #[error("failed to read snapshot file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reminder in a per-list snapshot could not be converted.
    #[error("invalid reminder in list '{list}': {source}")]
    Model {
        /// The list containing the reminder.
        list: String,
        /// The conversion error.
        #[source]
        source: ModelError,
    },
}

/// Result type for snapshot store operations.
pub type SnapshotResult<T> = std::result::Result<T, SnapshotStoreError>;

/// The per-list snapshot shape: `{"lists": {"<name>": [<reminder>, ...]}}`.
#[derive(Deserialize)]
struct ListsFile {
    lists: BTreeMap<String, Vec<RawReminder>>,
}

/// A list name and how many snapshot records it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub name: String,
    pub count: usize,
}

/// Read-only access to a snapshot file.
///
/// # Example
///
/// ```no_run
/// use reminders_query_rs::{SearchRequest, SnapshotStore};
///
/// let store = SnapshotStore::new()?;
/// let records = store.fetch(&SearchRequest::new().with_lists(["Groceries"]))?;
/// println!("{} open reminders in Groceries", records.len());
/// # Ok::<(), reminders_query_rs::SnapshotStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Path to the snapshot file.
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store reading the default XDG snapshot path.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotStoreError::NoCacheDir` if the home directory cannot be determined.
    pub fn new() -> SnapshotResult<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store reading a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG snapshot path.
    ///
    /// On Unix: `~/.cache/remq/snapshot.json`
    /// On macOS: `~/Library/Caches/remq/snapshot.json`
    ///
    /// # Errors
    ///
    /// Returns `SnapshotStoreError::NoCacheDir` if the home directory cannot be determined.
    pub fn default_path() -> SnapshotResult<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SnapshotStoreError::NoCacheDir)?;

        Ok(project_dirs.cache_dir().join(SNAPSHOT_FILENAME))
    }

    /// Returns the path to the snapshot file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads every record in the snapshot.
    ///
    /// Records from the per-list shape are ordered by list name, then by their
    /// position within the list.
    ///
    /// # Errors
    ///
    /// - Returns `SnapshotStoreError::ReadError` if the file cannot be read.
    /// - Returns `SnapshotStoreError::Json` if the file is not a snapshot.
    /// - Returns `SnapshotStoreError::Model` if a listed reminder is malformed.
    pub fn load(&self) -> SnapshotResult<Vec<Record>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| SnapshotStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        let records = if contents.trim_start().starts_with('[') {
            let mut records: Vec<Record> = serde_json::from_str(&contents)?;
            for record in &mut records {
                record.tags = normalize_tags(std::mem::take(&mut record.tags));
            }
            records
        } else {
            let ListsFile { lists } = serde_json::from_str(&contents)?;
            let mut records = Vec::new();
            for (list, reminders) in lists {
                for reminder in reminders {
                    let record = reminder
                        .into_record(&list)
                        .map_err(|source| SnapshotStoreError::Model {
                            list: list.clone(),
                            source,
                        })?;
                    records.push(record);
                }
            }
            records
        };

        debug!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Loads the records a request should run against.
    ///
    /// Completed records are dropped unless `includeCompleted` is set, and
    /// `lists` (matched ignoring case) restricts the result when present.
    pub fn fetch(&self, request: &SearchRequest) -> SnapshotResult<Vec<Record>> {
        let mut records = self.load()?;

        if !request.include_completed {
            records.retain(|record| !record.completed);
        }

        if let Some(lists) = &request.lists {
            let wanted: Vec<String> = lists.iter().map(|name| name.to_lowercase()).collect();
            records.retain(|record| wanted.contains(&record.list_name.to_lowercase()));
        }

        Ok(records)
    }

    /// Returns each list name with its record count, in first-seen order.
    pub fn list_names(&self) -> SnapshotResult<Vec<ListSummary>> {
        let mut summaries: Vec<ListSummary> = Vec::new();
        for record in self.load()? {
            match summaries
                .iter_mut()
                .find(|summary| summary.name == record.list_name)
            {
                Some(summary) => summary.count += 1,
                None => summaries.push(ListSummary {
                    name: record.list_name,
                    count: 1,
                }),
            }
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_returns_xdg_path() {
        if let Ok(path) = SnapshotStore::default_path() {
            assert!(path.ends_with("snapshot.json"));
            assert!(path.to_string_lossy().contains("remq"));
        }
    }

    #[test]
    fn test_with_path() {
        let store = SnapshotStore::with_path(PathBuf::from("/tmp/snapshot.json"));
        assert_eq!(store.path(), &PathBuf::from("/tmp/snapshot.json"));
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = SnapshotStoreError::ReadError {
            path: PathBuf::from("/missing/snapshot.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/snapshot.json"));

        let err = SnapshotStoreError::Model {
            list: "Work".to_string(),
            source: ModelError::MissingId,
        };
        assert!(err.to_string().contains("'Work'"));
    }
}
