//! CLI end-to-end tests.
//!
//! These tests run the `remq` binary against a snapshot written into a
//! temporary sandbox, with config and cache directories redirected there too.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use serial_test::serial;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "lists": {
    "Home": [
      {"id": "a", "title": "Pay rent", "priority": 1, "dueDate": "2025-01-31T09:00:00Z",
       "isCompleted": false, "tags": ["bills"]},
      {"id": "b", "title": "Fix sink", "priority": 5, "isCompleted": false,
       "tags": ["repairs", "weekend"]},
      {"id": "f", "title": "Old chore", "priority": 0, "isCompleted": true}
    ],
    "Work": [
      {"id": "c", "title": "Quarterly report", "priority": "high", "notes": "Send to finance",
       "dueDate": "2025-01-09T17:00:00Z", "isCompleted": false}
    ],
    "Travel": [
      {"id": "d", "title": "Book flights", "priority": 9, "dueDate": "2025-01-07T08:00:00Z",
       "isCompleted": false, "tags": ["weekend"]},
      {"id": "e", "title": "Renew passport", "notes": "Photos first", "isCompleted": false}
    ]
  }
}"#;

const NOW: &str = "2025-01-08T12:00:00Z";

fn resolve_remq_binary_path() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_remq") {
        return PathBuf::from(path);
    }

    // Fallback for environments where Cargo doesn't export CARGO_BIN_EXE_remq
    // for this integration test binary.
    let test_binary = env::current_exe().expect("failed to resolve current test executable path");
    let debug_dir = test_binary
        .parent()
        .and_then(|p| p.parent())
        .expect("failed to resolve target/debug directory")
        .to_path_buf();

    let mut candidate = debug_dir.join("remq");
    if cfg!(windows) {
        candidate.set_extension("exe");
    }

    assert!(
        candidate.exists(),
        "remq binary not found at expected path: {}",
        candidate.display()
    );
    candidate
}

struct Sandbox {
    bin_path: PathBuf,
    _dir: TempDir,
    snapshot_path: PathBuf,
    config_path: PathBuf,
    xdg_config_home: PathBuf,
    xdg_cache_home: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary sandbox");
        let snapshot_path = dir.path().join("snapshot.json");
        let config_path = dir.path().join("remq-config.toml");
        let xdg_config_home = dir.path().join("xdg-config");
        let xdg_cache_home = dir.path().join("xdg-cache");

        fs::write(&snapshot_path, SNAPSHOT).expect("failed to write snapshot");
        fs::create_dir_all(&xdg_config_home).expect("failed to create XDG config dir");
        fs::create_dir_all(&xdg_cache_home).expect("failed to create XDG cache dir");

        Self {
            bin_path: resolve_remq_binary_path(),
            _dir: dir,
            snapshot_path,
            config_path,
            xdg_config_home,
            xdg_cache_home,
        }
    }

    fn output(&self, args: &[&str]) -> Output {
        Command::new(&self.bin_path)
            .args(args)
            .env("REMQ_SNAPSHOT", &self.snapshot_path)
            .env("REMQ_CONFIG", &self.config_path)
            .env("XDG_CONFIG_HOME", &self.xdg_config_home)
            .env("XDG_CACHE_HOME", &self.xdg_cache_home)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run remq")
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self.output(args);
        assert!(
            output.status.success(),
            "remq command failed\nargs: {:?}\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        serde_json::from_str(&self.run(&full)).expect("stdout is JSON")
    }
}

fn ids(response: &Value) -> Vec<String> {
    response["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ==================== Search ====================

#[test]
#[serial]
fn test_search_filter_sort_json() {
    let sandbox = Sandbox::new();
    let response = sandbox.run_json(&[
        "search",
        "--filter",
        "priority = high",
        "--sort",
        "dueDate",
        "--now",
        NOW,
    ]);

    assert_eq!(ids(&response), vec!["c", "a"]);
    assert_eq!(response["totalCount"], 2);
    assert_eq!(response["hasMore"], false);
}

#[test]
#[serial]
fn test_search_relative_dates() {
    let sandbox = Sandbox::new();
    let response = sandbox.run_json(&[
        "search",
        "--filter",
        "dueDate before end of week",
        "--sort",
        "dueDate:desc",
        "--now",
        NOW,
    ]);
    assert_eq!(ids(&response), vec!["c", "d"]);
}

#[test]
#[serial]
fn test_search_completed_and_lists() {
    let sandbox = Sandbox::new();

    let open = sandbox.run_json(&["search", "--list", "home", "--now", NOW]);
    assert_eq!(open["totalCount"], 2);

    let all = sandbox.run_json(&["search", "--list", "home", "--include-completed", "--now", NOW]);
    assert_eq!(all["totalCount"], 3);
}

#[test]
#[serial]
fn test_search_groups_and_pagination() {
    let sandbox = Sandbox::new();
    let response = sandbox.run_json(&[
        "search",
        "--group-by",
        "list",
        "--sort",
        "title",
        "--limit",
        "2",
        "--offset",
        "1",
        "--now",
        NOW,
    ]);

    assert_eq!(response["totalCount"], 5);
    assert_eq!(response["returnedCount"], 2);
    assert_eq!(response["hasMore"], true);
    assert_eq!(response["limit"], 2);
    assert_eq!(response["offset"], 1);

    let groups = response["groups"].as_array().expect("groups");
    let values: Vec<&str> = groups.iter().filter_map(|g| g["value"].as_str()).collect();
    assert_eq!(values, vec!["Home", "Travel", "Work"]);
    let total: u64 = groups.iter().filter_map(|g| g["count"].as_u64()).sum();
    assert_eq!(total, 5);
}

#[test]
#[serial]
fn test_search_query_and_logic_file() {
    let sandbox = Sandbox::new();
    let logic_path = sandbox.snapshot_path.with_file_name("logic.json");
    fs::write(
        &logic_path,
        r#"{"any":[{"clause":{"field":"list","op":"equals","value":"travel"}},
                   {"clause":{"field":"list","op":"equals","value":"work"}}]}"#,
    )
    .unwrap();

    let logic_arg = format!("@{}", logic_path.display());
    let response = sandbox.run_json(&["search", "--logic", &logic_arg, "--query", "FIRST", "--now", NOW]);
    assert_eq!(ids(&response), vec!["e"]);
}

#[test]
#[serial]
fn test_search_table_output() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run(&["search", "--filter", "list = work", "--now", NOW]);

    assert!(stdout.starts_with("ID"));
    assert!(stdout.contains("Quarterly report"));
    assert!(stdout.contains("Tomorrow"));
    assert!(!stdout.contains('\u{1b}'), "NO_COLOR must disable ANSI escapes");
}

// ==================== Errors ====================

#[test]
#[serial]
fn test_invalid_filter_exits_1_with_json_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.output(&["--json", "search", "--filter", "titel = milk"]);

    assert_eq!(output.status.code(), Some(1));
    let error: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(error["error"]["code"], "FILTER_ERROR");
    let message = error["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("Did you mean 'title'?"), "{}", message);
}

#[test]
#[serial]
fn test_missing_snapshot_exits_5() {
    let sandbox = Sandbox::new();
    let missing = sandbox.snapshot_path.with_file_name("missing.json");
    let missing = missing.to_str().expect("utf-8 path");
    let output = sandbox.output(&["--snapshot", missing, "lists"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
#[serial]
fn test_unknown_sort_field_exits_1() {
    let sandbox = Sandbox::new();
    let output = sandbox.output(&["search", "--sort", "colour"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown sort field 'colour'"));
}

// ==================== Lists & Dates ====================

#[test]
#[serial]
fn test_lists() {
    let sandbox = Sandbox::new();
    let response = sandbox.run_json(&["lists"]);
    let names: Vec<&str> = response["lists"]
        .as_array()
        .expect("lists")
        .iter()
        .filter_map(|l| l["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Home", "Travel", "Work"]);
    assert_eq!(response["total"], 6);
}

#[test]
#[serial]
fn test_resolve_date() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run(&["resolve-date", "tomorrow", "--now", NOW, "--tz", "Europe/Berlin"]);
    assert_eq!(stdout.trim(), "2025-01-09T00:00:00+01:00");

    let output = sandbox.output(&["resolve-date", "someday maybe", "--now", NOW]);
    assert_eq!(output.status.code(), Some(1));
}

// ==================== Config ====================

#[test]
#[serial]
fn test_config_limit_applies_to_search() {
    let sandbox = Sandbox::new();
    sandbox.run(&["config", "set", "search.limit", "1"]);
    assert!(sandbox.config_path.exists());

    let response = sandbox.run_json(&["search", "--sort", "title", "--now", NOW]);
    assert_eq!(response["returnedCount"], 1);
    assert_eq!(response["hasMore"], true);

    let path = sandbox.run(&["config", "path"]);
    assert_eq!(path.trim(), sandbox.config_path.display().to_string());
}

#[test]
#[serial]
fn test_config_init_then_show() {
    let sandbox = Sandbox::new();
    sandbox.run(&["config", "init"]);

    let shown = sandbox.run_json(&["config", "show"]);
    assert_eq!(shown["exists"], true);
    assert_eq!(shown["config"]["version"], 1);

    let output = sandbox.output(&["config", "init"]);
    assert_eq!(output.status.code(), Some(5));
}
