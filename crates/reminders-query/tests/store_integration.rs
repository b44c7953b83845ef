//! Integration tests for SnapshotStore.
//!
//! These tests verify that snapshots are read from disk in both supported
//! shapes and that request selectors are applied.

use std::fs;

use reminders_model_rs::models::PriorityBucket;
use reminders_query_rs::{ListSummary, SearchRequest, SnapshotStore, SnapshotStoreError};
use tempfile::tempdir;

const LISTS_SNAPSHOT: &str = r#"{
  "lists": {
    "Work": [
      {"id": "w1", "title": "Quarterly report", "priority": 1, "dueDate": "2025-01-09T17:00:00Z",
       "isCompleted": false, "tags": ["finance", " Finance ", ""]},
      {"id": "w2", "title": "Archive tickets", "priority": 9, "isCompleted": true}
    ],
    "Groceries": [
      {"id": "g1", "title": "Buy milk", "priority": "medium", "notes": "oat", "isCompleted": false},
      {"id": "g2", "title": "Buy eggs", "priority": 0, "isCompleted": false, "listName": "Shopping"}
    ]
  }
}"#;

const FLAT_SNAPSHOT: &str = r#"[
  {"id": "1", "title": "Buy milk", "listName": "Groceries", "priorityBucket": "high", "completed": false},
  {"id": "2", "title": "Walk dog", "listName": "Home", "priority": "low", "isCompleted": true},
  {"id": "3", "title": "Buy bread", "listName": "groceries"}
]"#;

fn store_with(contents: &str) -> (tempfile::TempDir, SnapshotStore) {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("snapshot.json");
    fs::write(&path, contents).expect("failed to write snapshot");
    (temp_dir, SnapshotStore::with_path(path))
}

#[test]
fn test_load_per_list_snapshot() {
    let (_dir, store) = store_with(LISTS_SNAPSHOT);
    let records = store.load().expect("failed to load snapshot");

    // Lists come back in name order.
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2", "w1", "w2"]);

    let report = &records[2];
    assert_eq!(report.list_name, "Work");
    assert_eq!(report.priority_bucket, PriorityBucket::High);
    assert_eq!(report.tags, vec!["finance"]);
    assert!(report.due_date.is_some());

    assert_eq!(records[0].priority_bucket, PriorityBucket::Medium);
    assert_eq!(records[1].list_name, "Shopping");
    assert_eq!(records[3].priority_bucket, PriorityBucket::Low);
    assert!(records[3].completed);
}

#[test]
fn test_load_flat_snapshot() {
    let (_dir, store) = store_with(FLAT_SNAPSHOT);
    let records = store.load().expect("failed to load snapshot");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].priority_bucket, PriorityBucket::High);
    assert_eq!(records[1].priority_bucket, PriorityBucket::Low);
    assert!(records[1].completed);
    assert_eq!(records[2].priority_bucket, PriorityBucket::None);
}

#[test]
fn test_fetch_drops_completed_by_default() {
    let (_dir, store) = store_with(FLAT_SNAPSHOT);

    let open = store.fetch(&SearchRequest::new()).unwrap();
    assert_eq!(open.len(), 2);

    let everything = store
        .fetch(&SearchRequest::new().with_include_completed(true))
        .unwrap();
    assert_eq!(everything.len(), 3);
}

#[test]
fn test_fetch_restricts_lists_ignoring_case() {
    let (_dir, store) = store_with(FLAT_SNAPSHOT);
    let records = store
        .fetch(&SearchRequest::new().with_lists(["GROCERIES"]))
        .unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_list_names_first_seen_order() {
    let (_dir, store) = store_with(FLAT_SNAPSHOT);
    let lists = store.list_names().unwrap();
    assert_eq!(
        lists,
        vec![
            ListSummary {
                name: "Groceries".to_string(),
                count: 1
            },
            ListSummary {
                name: "Home".to_string(),
                count: 1
            },
            ListSummary {
                name: "groceries".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn test_load_missing_file_returns_read_error() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = SnapshotStore::with_path(temp_dir.path().join("nonexistent.json"));

    let err = store.load().unwrap_err();
    assert!(matches!(err, SnapshotStoreError::ReadError { .. }));
    assert!(err.to_string().contains("nonexistent.json"));
}

#[test]
fn test_load_invalid_json() {
    let (_dir, store) = store_with("{not json");
    assert!(matches!(store.load(), Err(SnapshotStoreError::Json(_))));
}

#[test]
fn test_load_invalid_reminder_names_list() {
    let (_dir, store) = store_with(
        r#"{"lists": {"Work": [{"id": "w1", "title": "x", "priority": "urgent"}]}}"#,
    );
    let err = store.load().unwrap_err();
    match err {
        SnapshotStoreError::Model { list, .. } => assert_eq!(list, "Work"),
        other => panic!("expected model error, got {other:?}"),
    }
}

#[test]
fn test_load_flat_snapshot_normalizes_tags() {
    let (_dir, store) = store_with(
        r#"[{"id": "1", "title": "Fix sink", "tags": ["home", " Home ", "", "repairs", "home"]}]"#,
    );
    let records = store.load().unwrap();
    assert_eq!(records[0].tags, vec!["home", "repairs"]);
}

#[test]
fn test_load_flat_snapshot_reports_malformed_record() {
    let (_dir, store) = store_with(
        "[\n  {\"id\": \"1\", \"title\": \"ok\"},\n  {\"id\": \"2\", \"priority\": \"low\"}\n]",
    );
    let err = store.load().unwrap_err();
    assert!(matches!(err, SnapshotStoreError::Json(_)));
    let message = err.to_string();
    assert!(message.contains("missing field `title`"), "{}", message);
    assert!(message.contains("line 3"), "{}", message);
}

#[test]
fn test_load_per_list_snapshot_reports_missing_lists_key() {
    let (_dir, store) = store_with(r#"{"records": []}"#);
    let message = store.load().unwrap_err().to_string();
    assert!(message.contains("missing field `lists`"), "{}", message);
}
