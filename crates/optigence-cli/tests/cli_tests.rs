//! Integration tests for the `optigence` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the propose,
//! classify and extract subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, exit codes and collaborator failures.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: absolute path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn optigence() -> Command {
    let mut cmd = Command::cargo_bin("optigence").unwrap();
    cmd.env_remove("OPTIGENCE_MAX_RESULTS");
    cmd
}

/// Helper: run a command and parse its stdout as JSON.
fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Propose subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn propose_open_calendar_from_stdin() {
    let request = std::fs::read_to_string(fixture("request.json")).unwrap();
    let json = json_stdout(
        optigence()
            .args(["propose", "--now", "2026-03-15T12:00:00Z"])
            .write_stdin(request),
    );

    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["start"], "2026-03-16T09:00:00Z");
    assert_eq!(slots[0]["score"], 89);
    assert_eq!(json["generated_at"], "2026-03-15T12:00:00Z");
    assert_eq!(json["busy"].as_array().unwrap().len(), 0);
}

#[test]
fn propose_avoids_busy_intervals() {
    let json = json_stdout(optigence().args([
        "propose",
        "-i",
        &fixture("request.json"),
        "--busy",
        &fixture("busy.json"),
    ]));

    let starts: Vec<&str> = json["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2026-03-16T10:00:00Z",
            "2026-03-16T10:30:00Z",
            "2026-03-16T11:00:00Z"
        ]
    );
    assert_eq!(json["busy"].as_array().unwrap().len(), 2);
}

#[test]
fn propose_applies_stored_preferences() {
    let json = json_stdout(optigence().args([
        "propose",
        "-i",
        &fixture("request.json"),
        "--preferences",
        &fixture("preferences.json"),
    ]));

    assert_eq!(json["slots"][0]["start"], "2026-03-16T15:00:00Z");
    assert_eq!(json["slots"][0]["score"], 83);
    assert_eq!(json["preferences"]["preferred_ranges"][0]["start_hour"], 15);
}

#[test]
fn propose_max_results_from_env() {
    let json = json_stdout(
        optigence()
            .args(["propose", "-i", &fixture("request.json")])
            .env("OPTIGENCE_MAX_RESULTS", "5"),
    );
    assert_eq!(json["slots"].as_array().unwrap().len(), 5);
}

#[test]
fn propose_writes_output_file() {
    let output_path = std::env::temp_dir().join("optigence-test-proposal.json");
    let _ = std::fs::remove_file(&output_path);

    optigence()
        .args(["propose", "-i", &fixture("request.json"), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["slots"].as_array().unwrap().len(), 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn propose_invalid_window_exits_2() {
    optigence()
        .args(["propose", "-i", &fixture("invalid_request.json")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid window"));
}

#[test]
fn propose_missing_busy_file_exits_3() {
    optigence()
        .args([
            "propose",
            "-i",
            &fixture("request.json"),
            "--busy",
            "/nonexistent/busy.json",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Calendar provider error"));
}

#[test]
fn propose_malformed_busy_file_exits_3() {
    optigence()
        .args([
            "propose",
            "-i",
            &fixture("request.json"),
            "--busy",
            &fixture("malformed_busy.json"),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("malformed provider response"));
}

#[test]
fn propose_garbage_request_exits_2() {
    optigence()
        .arg("propose")
        .write_stdin("not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Malformed request"));
}

#[test]
fn propose_unparseable_window_start_exits_2() {
    optigence()
        .arg("propose")
        .write_stdin(
            r#"{"window_start":"next tuesday","window_end":"2026-03-16T17:00:00Z","duration_minutes":60}"#,
        )
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Malformed request"));
}

#[test]
fn propose_negative_duration_exits_2() {
    optigence()
        .arg("propose")
        .write_stdin(
            r#"{"window_start":"2026-03-16T09:00:00Z","window_end":"2026-03-16T17:00:00Z","duration_minutes":-5}"#,
        )
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Malformed request"));
}

#[test]
fn propose_window_over_limit_exits_2() {
    optigence()
        .arg("propose")
        .write_stdin(
            r#"{"window_start":"2026-01-01T00:00:00Z","window_end":"2028-01-01T00:00:00Z","duration_minutes":60}"#,
        )
        .assert()
        .code(2)
        .stderr(predicate::str::contains("day limit"));
}

#[test]
fn propose_missing_input_file_exits_1() {
    optigence()
        .args(["propose", "-i", "/nonexistent/request.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn invalid_log_filter_is_reported() {
    optigence()
        .args(["--log-level", "optigence=loud", "classify", "hello there"])
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid log filter"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Classify and extract subcommands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn classify_positional_text() {
    let json = json_stdout(optigence().args(["classify", "book a flight and a hotel in Lisbon"]));
    assert_eq!(json["intent"], "trip");
    assert_eq!(json["source"], "keywords");
}

#[test]
fn classify_from_stdin() {
    let json = json_stdout(
        optigence()
            .arg("classify")
            .write_stdin("Please reply to this email"),
    );
    assert_eq!(json["intent"], "mail");
}

#[test]
fn classify_unmatched_text_is_general() {
    let json = json_stdout(optigence().args(["classify", "hello there"]));
    assert_eq!(json["intent"], "general");
    assert_eq!(json["confidence"], 0.0);
}

#[test]
fn extract_from_stdin() {
    let json = json_stdout(
        optigence()
            .arg("extract")
            .write_stdin("30 min call with dana@example.com tomorrow at 3pm"),
    );
    assert_eq!(json["emails"][0], "dana@example.com");
    assert_eq!(json["dates"][0], "tomorrow");
    assert_eq!(json["times"][0], "15:00");
    assert_eq!(json["durations_minutes"][0], 30);
}

#[test]
fn zero_cache_capacity_is_rejected() {
    optigence()
        .args(["--cache-capacity", "0", "classify", "hi"])
        .assert()
        .failure();
}

#[test]
fn no_subcommand_shows_usage() {
    optigence()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
