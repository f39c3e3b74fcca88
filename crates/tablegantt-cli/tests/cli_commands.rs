//! CLI integration tests
//!
//! Run the built `tablegantt` binary against fixture charts.
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success |
//! | 1 | Malformed or inverted input, unreadable file, bad arguments for a range |
//! | 2 | Command-line usage error (from clap) |

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn tablegantt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tablegantt"))
        .args(args)
        .env_remove("TABLEGANTT_TODAY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute tablegantt")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn season() -> String {
    fixture("build_season.json").display().to_string()
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_valid_chart() {
    let output = tablegantt(&["check", &season()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Build Season"));
    assert!(out.contains("Range: 2024-03-01 to 2024-03-20 (20 days)"));
    assert!(out.contains("Tasks: 3"));
    assert!(out.contains("Breaks: 1"));
    assert!(out.contains("Major dates: 1"));
}

#[test]
fn check_rejects_malformed_date() {
    let output = tablegantt(&["check", &fixture("malformed_date.json").display().to_string()]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("tasks[1].end_date"), "stderr: {}", err);
    assert!(err.contains("2024-02-30"));
}

#[test]
fn check_rejects_inverted_task() {
    let output = tablegantt(&["check", &fixture("inverted_task.json").display().to_string()]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("tasks[0]"), "stderr: {}", err);
    assert!(err.contains("Backwards"));
}

#[test]
fn check_missing_file() {
    let output = tablegantt(&["check", "/nonexistent/chart.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("/nonexistent/chart.json"));
}

// =============================================================================
// layout
// =============================================================================

#[test]
fn layout_json_output() {
    let output = tablegantt(&["layout", &season(), "--today", "2024-03-07"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["today"], "2024-03-07");
    assert_eq!(layout["days"].as_array().unwrap().len(), 20);
    assert_eq!(layout["weeks"].as_array().unwrap().len(), 4);

    let rows = layout["rows"].as_array().unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Firmware", "Chassis", "Paint"]);

    let chassis = &rows[1];
    assert_eq!(chassis["metrics"]["total_days"], 10);
    assert_eq!(chassis["metrics"]["break_days"], 3);
    assert_eq!(chassis["metrics"]["active_days"], 7);
    assert_eq!(chassis["metrics"]["due_offset_days"], 3);
    assert_eq!(chassis["placement"]["span_days"], 10);
}

#[test]
fn layout_window_flags() {
    let output = tablegantt(&[
        "layout",
        &season(),
        "--from",
        "2024-03-09",
        "--to",
        "2024-03-12",
        "--today",
        "2024-03-07",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["rows"].as_array().unwrap().len(), 1);
    assert_eq!(layout["excluded"].as_array().unwrap().len(), 2);
    assert_eq!(layout["rows"][0]["placement"]["leading_gap"], 0);
    assert_eq!(layout["rows"][0]["placement"]["span_days"], 2);
    assert_eq!(layout["rows"][0]["placement"]["trailing_gap"], 2);
}

#[test]
fn layout_today_from_environment() {
    let input = season();
    let output = Command::new(env!("CARGO_BIN_EXE_tablegantt"))
        .args(["layout", input.as_str(), "--format", "text"])
        .env("TABLEGANTT_TODAY", "2024-03-12")
        .output()
        .expect("failed to execute tablegantt");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("today 2024-03-12"));
    assert!(out.contains("2 days overdue"));
}

#[test]
fn layout_rejects_inverted_window() {
    let output = tablegantt(&[
        "layout",
        &season(),
        "--from",
        "2024-03-12",
        "--to",
        "2024-03-09",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("visible window"));
}

#[test]
fn layout_rejects_malformed_date_argument() {
    let output = tablegantt(&["layout", &season(), "--from", "2024-3-x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("2024-3-x"));
}

#[test]
fn layout_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("layout.json");

    let output = tablegantt(&[
        "layout",
        &season(),
        "--today",
        "2024-03-07",
        "-o",
        &out_path.display().to_string(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("\"Chassis\""));
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_html() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("chart.html");

    let output = tablegantt(&[
        "render",
        &season(),
        "-o",
        &out_path.display().to_string(),
        "--today",
        "2024-03-07",
        "--day-width",
        "28",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let html = std::fs::read_to_string(&out_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Build Season"));
    assert!(html.contains("--day-width: 28px;"));
    assert!(html.contains("<script>"));
}

#[test]
fn render_static_dark_html() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("chart.html");

    let output = tablegantt(&[
        "render",
        &season(),
        "-o",
        &out_path.display().to_string(),
        "--dark",
        "--static",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let html = std::fs::read_to_string(&out_path).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("#1a1a2e"));
}

#[test]
fn render_svg_inferred_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("chart.svg");

    let output = tablegantt(&["render", &season(), "-o", &out_path.display().to_string()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let svg = std::fs::read_to_string(&out_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Chassis"));
}

#[test]
fn render_rejects_tiny_day_width() {
    let output = tablegantt(&["render", &season(), "-o", "unused.html", "--day-width", "1"]);
    assert_eq!(output.status.code(), Some(2));
}
