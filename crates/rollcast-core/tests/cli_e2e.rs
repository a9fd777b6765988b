//! End-to-end CLI tests for the rollcast binary.
//!
//! Every test works on its own temp data file and config home, so nothing
//! from the invoking user's environment leaks in.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Sandbox {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn data(&self) -> PathBuf {
        self.dir.path().join("log.json")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rollcast").expect("rollcast binary should exist");
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("ROLLCAST_CONFIG")
            .env_remove("ROLLCAST_CONFIG_DIR")
            .env_remove("ROLLCAST_DATA")
            .env_remove("ROLLCAST_LOG")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(self.data());
        cmd
    }

    fn add(&self, first: i64, second: i64) {
        self.cmd()
            .args(["add", &first.to_string(), &second.to_string()])
            .assert()
            .success();
    }

    fn json(&self, args: &[&str]) -> (Value, i32) {
        let out = self.cmd().args(["-f", "json"]).args(args).output().expect("run");
        let code = out.status.code().expect("exit code");
        let value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
        (value, code)
    }
}

fn read_log(path: &Path) -> Vec<Value> {
    let text = std::fs::read_to_string(path).expect("log file");
    serde_json::from_str(&text).expect("log is a JSON array")
}

// ============================================================================
// Recording
// ============================================================================

mod recording {
    use super::*;

    #[test]
    fn add_persists_classified_observation() {
        let sb = Sandbox::new();
        let (value, code) = sb.json(&["add", "10", "20"]);
        assert_eq!(code, 0);
        assert_eq!(value["command"], "add");
        assert_eq!(value["first_state"], "LOW");
        assert_eq!(value["second_state"], "MID");
        assert_eq!(value["outcome_class"], "K");
        assert_eq!(value["trend"], "rising");
        assert_eq!(value["delta"], 10);

        let log = read_log(&sb.data());
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["id"], value["id"]);
    }

    #[test]
    fn add_rejects_out_of_range_value() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["add", "10", "55"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("second value 55 is outside [6, 54]"));
        assert!(!sb.data().exists());
    }

    #[test]
    fn add_rejects_negative_and_non_numeric_values() {
        let sb = Sandbox::new();
        sb.cmd().args(["add", "-3", "20"]).assert().code(10);
        sb.cmd()
            .args(["add", "ten", "20"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("not a whole number"));
    }

    #[test]
    fn json_errors_are_structured() {
        let sb = Sandbox::new();
        let out = sb
            .cmd()
            .args(["-f", "json", "add", "5", "20"])
            .output()
            .expect("run");
        assert_eq!(out.status.code(), Some(10));
        let err: Value = serde_json::from_slice(&out.stderr).expect("stderr is JSON");
        assert_eq!(err["status"], "error");
        assert_eq!(err["error"]["code"], 10);
        assert_eq!(err["error"]["category"], "validation");
        assert_eq!(err["error"]["context"]["field"], "first");
    }

    #[test]
    fn remove_deletes_by_id() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        sb.add(30, 40);
        let id = read_log(&sb.data())[0]["id"].to_string();

        let (value, code) = sb.json(&["remove", &id]);
        assert_eq!(code, 0);
        assert_eq!(value["removed"], true);
        assert_eq!(value["remaining"], 1);
        assert_eq!(read_log(&sb.data()).len(), 1);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        let (value, code) = sb.json(&["remove", "42"]);
        assert_eq!(code, 0);
        assert_eq!(value["removed"], false);
        assert_eq!(read_log(&sb.data()).len(), 1);
    }

    #[test]
    fn clear_requires_confirmation() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        sb.cmd().arg("clear").assert().code(10);
        assert_eq!(read_log(&sb.data()).len(), 1);

        sb.cmd().args(["clear", "--yes"]).assert().success();
        assert!(read_log(&sb.data()).is_empty());
    }
}

// ============================================================================
// Analysis
// ============================================================================

mod analysis {
    use super::*;

    fn reference() -> Sandbox {
        let sb = Sandbox::new();
        sb.add(10, 20);
        sb.add(15, 45);
        sb.add(50, 8);
        sb
    }

    #[test]
    fn predict_with_short_log_is_degenerate() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        let (value, code) = sb.json(&["predict"]);
        assert_eq!(code, 1);
        assert_eq!(value["small_pct"], 50);
        assert_eq!(value["big_pct"], 50);
        assert_eq!(value["confidence_pct"], 0);
        assert_eq!(value["factors"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn predict_reference_log() {
        let sb = reference();
        let (value, code) = sb.json(&["predict"]);
        assert_eq!(code, 0);
        assert_eq!(value["schema_version"], rollcast_common::SCHEMA_VERSION);
        assert_eq!(value["small_pct"], 59);
        assert_eq!(value["big_pct"], 41);
        assert_eq!(value["confidence_pct"], 10);
        assert_eq!(value["factors"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn predict_markdown_shows_factor_table() {
        reference()
            .cmd()
            .arg("predict")
            .assert()
            .success()
            .stdout(predicate::str::contains("| K (6-31) | 59% |"))
            .stdout(predicate::str::contains("Markov transition"));
    }

    #[test]
    fn multi_step_forecast() {
        let sb = reference();
        let (value, code) = sb.json(&["predict", "--steps", "5"]);
        assert_eq!(code, 0);
        let forecasts = value["forecasts"].as_array().expect("forecasts");
        assert_eq!(forecasts.len(), 5);
        let confidences: Vec<i64> = forecasts
            .iter()
            .map(|f| f["confidence_pct"].as_i64().unwrap())
            .collect();
        assert_eq!(confidences, vec![10, 5, 0, 0, 0]);
        assert!(forecasts.iter().all(|f| f["small_pct"] == 59));
    }

    #[test]
    fn steps_out_of_range_rejected_by_parser() {
        reference()
            .cmd()
            .args(["predict", "--steps", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn matrix_counts_and_probabilities() {
        let sb = reference();
        let (value, code) = sb.json(&["matrix"]);
        assert_eq!(code, 0);
        assert_eq!(value["total"], 3);
        assert_eq!(value["counts"]["LOW"]["MID"], 1);
        assert_eq!(value["counts"]["MID"]["EXTREME"], 1);
        assert_eq!(value["counts"]["EXTREME"]["LOW"], 1);
        assert_eq!(value["counts"]["HIGH"]["HIGH"], 0);
        assert_eq!(value["probabilities"]["LOW"]["MID"], 1.0);
        assert_eq!(value["probabilities"]["HIGH"]["LOW"], 0.0);
    }

    #[test]
    fn empty_log_analyses_report_insufficient_data() {
        let sb = Sandbox::new();
        sb.cmd().arg("matrix").assert().code(1);
        sb.cmd().arg("metrics").assert().code(1);
        sb.cmd()
            .arg("insights")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Insufficient data"));
    }

    #[test]
    fn metrics_json() {
        let sb = reference();
        let (value, code) = sb.json(&["metrics"]);
        assert_eq!(code, 0);
        assert_eq!(value["classes"]["small"], 2);
        assert_eq!(value["classes"]["big"], 1);
        assert_eq!(value["alternation_pct"], 100.0);
    }

    #[test]
    fn status_summary_line() {
        reference()
            .cmd()
            .args(["-f", "summary", "status"])
            .assert()
            .success()
            .stdout("entries=3 K=66.7% last=LOW\n");
    }

    #[test]
    fn list_newest_first_with_search() {
        let sb = reference();
        let (value, _) = sb.json(&["list"]);
        let rows = value["rows"].as_array().expect("rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["observation"]["second_value"], 8);

        let (value, _) = sb.json(&["list", "--search", "extreme"]);
        let rows = value["rows"].as_array().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["observation"]["second_value"], 45);

        let (value, _) = sb.json(&["list", "--oldest-first", "--limit", "1"]);
        assert_eq!(value["rows"][0]["observation"]["first_value"], 10);
    }
}

// ============================================================================
// Import / export
// ============================================================================

mod transfer {
    use super::*;

    #[test]
    fn export_then_import_into_fresh_log() {
        let source = Sandbox::new();
        source.add(10, 20);
        source.add(15, 45);
        let export = source.path("export.json");
        source
            .cmd()
            .args(["export", "--output"])
            .arg(&export)
            .assert()
            .success();

        let target = Sandbox::new();
        target.add(30, 30);
        let (value, code) = target.json(&["import", export.to_str().unwrap()]);
        assert_eq!(code, 0);
        assert_eq!(value["imported"], 2);
        assert_eq!(value["replaced"], 1);
        assert_eq!(read_log(&target.data()), read_log(&source.data()));
    }

    #[test]
    fn export_to_stdout_is_raw_array() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        let out = sb
            .cmd()
            .args(["-f", "json", "export", "--output", "-"])
            .output()
            .expect("run");
        assert!(out.status.success());
        let value: Value = serde_json::from_slice(&out.stdout).expect("JSON");
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn malformed_import_leaves_log_untouched() {
        let sb = Sandbox::new();
        sb.add(10, 20);
        let before = read_log(&sb.data());

        let bad = sb.path("bad.json");
        std::fs::write(&bad, r#"{"entries": []}"#).unwrap();
        sb.cmd()
            .arg("import")
            .arg(&bad)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("malformed log"));

        assert_eq!(read_log(&sb.data()), before);
    }

    #[test]
    fn missing_import_file_is_io_error() {
        let sb = Sandbox::new();
        sb.cmd()
            .arg("import")
            .arg(sb.path("absent.json"))
            .assert()
            .code(21);
    }

    #[test]
    fn corrupt_log_file_is_reported() {
        let sb = Sandbox::new();
        std::fs::write(sb.data(), "{ not a log").unwrap();
        sb.cmd().arg("status").assert().code(21);
    }
}

// ============================================================================
// Config and misc
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn show_defaults() {
        let sb = Sandbox::new();
        let (value, code) = sb.json(&["config", "show"]);
        assert_eq!(code, 0);
        assert_eq!(value["source"], "builtin default");
        assert_eq!(value["engine"]["weights"]["current_state"], 25.0);
    }

    #[test]
    fn validate_rejects_bad_weights() {
        let sb = Sandbox::new();
        let file = sb.path("engine.json");
        std::fs::write(&file, r#"{"weights": {"numeric_trend": 90}}"#).unwrap();
        sb.cmd()
            .args(["config", "validate"])
            .arg(&file)
            .assert()
            .code(12);
    }

    #[test]
    fn validate_accepts_partial_file() {
        let sb = Sandbox::new();
        let file = sb.path("engine.json");
        std::fs::write(&file, r#"{"thresholds": {"recent_window": 8}}"#).unwrap();
        sb.cmd()
            .args(["config", "validate"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn invalid_config_blocks_commands() {
        let sb = Sandbox::new();
        let file = sb.path("engine.json");
        std::fs::write(&file, "not json").unwrap();
        sb.cmd()
            .arg("--config")
            .arg(&file)
            .arg("predict")
            .assert()
            .code(12);
    }

    #[test]
    fn completions_and_version() {
        let sb = Sandbox::new();
        sb.cmd()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("rollcast"));
        sb.cmd()
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("rollcast "));
    }

    #[test]
    fn schema_for_exported_record() {
        let out = Sandbox::new()
            .cmd()
            .args(["schema", "Observation"])
            .output()
            .expect("run");
        assert_eq!(out.status.code(), Some(0));
        let schema: Value = serde_json::from_slice(&out.stdout).expect("schema is JSON");
        for field in ["id", "first_value", "second_value", "outcome_class", "created_at"] {
            assert!(schema["properties"].get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn schema_list_and_all_agree() {
        let sb = Sandbox::new();
        let (listed, code) = sb.json(&["schema", "--list"]);
        assert_eq!(code, 0);
        let names: Vec<&str> = listed["schemas"]
            .as_array()
            .expect("schemas array")
            .iter()
            .map(|s| s["name"].as_str().expect("name"))
            .collect();
        assert!(names.contains(&"Forecast"));

        let out = sb.cmd().args(["schema", "--all", "--compact"]).output().expect("run");
        assert_eq!(out.status.code(), Some(0));
        let all: Value = serde_json::from_slice(&out.stdout).expect("schemas are JSON");
        assert_eq!(all.as_object().expect("map").len(), names.len());
    }

    #[test]
    fn schema_rejects_unknown_type() {
        Sandbox::new()
            .cmd()
            .args(["schema", "Plan"])
            .assert()
            .failure();
    }

    #[test]
    fn unknown_command_fails() {
        Sandbox::new()
            .cmd()
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}
