//! CLI behavior tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/java")
}

fn cmd() -> Command {
    Command::cargo_bin("patternscout").expect("binary should build")
}

#[test]
fn help_mentions_design_patterns() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("design pattern"));
}

#[test]
fn terminal_report_lists_detected_patterns() {
    cmd()
        .arg(fixtures_path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("singleton"))
        .stdout(predicate::str::contains("factory_method"))
        .stdout(predicate::str::contains("facade"));
}

#[test]
fn json_report_is_written_to_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");

    cmd()
        .arg(fixtures_path())
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["patterns"]["factory_method"]["ShapeCreator"]["abstract_product"], "Shape");
}

#[test]
fn csv_report_is_written_at_batch_end() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("patterns.csv");

    cmd()
        .arg(fixtures_path())
        .arg("--csv")
        .arg(&csv)
        .arg("--quiet")
        .assert()
        .success();

    let text = std::fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("project,pattern,role,detail"));
    assert!(text.contains("singleton,AppSettings"));
}

#[test]
fn empty_project_fails_with_a_message() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Java files"));
}

#[test]
fn exclude_pattern_removes_files_from_analysis() {
    cmd()
        .arg(fixtures_path())
        .arg("--exclude")
        .arg("Broken")
        .arg("--format")
        .arg("summary")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 failed"));
}
