//! Batch case file tests.

use super::{fixtures_dir, output_compare};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_batch_text_report() {
    output_compare()
        .arg("batch")
        .arg(fixtures_dir().join("cases.yaml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("running 4 cases"))
        .stdout(predicate::str::contains("case exact ... ok"))
        .stdout(predicate::str::contains(
            "case json with different spacing ... ok",
        ))
        .stdout(predicate::str::contains("case float-tolerance ... ok"))
        .stdout(predicate::str::contains("case wrong-line ... FAILED"))
        .stdout(predicate::str::contains("---- wrong-line ----"))
        .stdout(predicate::str::contains(
            "Wrong answer at line 0: abc != abd",
        ))
        .stdout(predicate::str::contains(
            "test result: FAILED. 3 passed; 1 failed",
        ));
}

#[test]
fn test_batch_all_pass_json_file() {
    output_compare()
        .arg("batch")
        .arg(fixtures_dir().join("all_pass.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "test result: ok. 2 passed; 0 failed",
        ))
        .stdout(predicate::str::contains("failures:").not());
}

#[test]
fn test_batch_json_report() -> TestResult {
    let output = output_compare()
        .arg("batch")
        .arg(fixtures_dir().join("cases.yaml"))
        .args(["--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(json["timestamp"].is_string());
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["passed"], 3);
    assert_eq!(json["summary"]["failed"], 1);

    let results = json["results"].as_array().ok_or("results should be an array")?;
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["strategy"], "exact");
    assert_eq!(results[1]["strategy"], "structural");
    assert_eq!(results[1]["desc"], "json with different spacing");
    assert_eq!(results[2]["strategy"], "line");
    assert_eq!(results[3]["matched"], false);
    Ok(())
}

#[test]
fn test_batch_verbose_table() {
    output_compare()
        .arg("batch")
        .arg(fixtures_dir().join("all_pass.json"))
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy"))
        .stdout(predicate::str::contains("structural"));
}

#[test]
fn test_batch_unknown_field() {
    output_compare()
        .arg("batch")
        .arg(fixtures_dir().join("unknown_field.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_batch_missing_file() {
    output_compare()
        .args(["batch", "/nonexistent/cases.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("case file not found"));
}

#[test]
fn test_batch_empty_cases_warns() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("cases.yaml");
    fs::write(&path, "cases: []\n")?;

    output_compare()
        .arg("batch")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: No cases found"));
    Ok(())
}

#[test]
fn test_batch_duplicate_ids() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("cases.yaml");
    fs::write(
        &path,
        "cases:\n  - id: a\n    prediction: \"1\"\n    expected: \"1\"\n  - id: a\n    prediction: \"2\"\n    expected: \"2\"\n",
    )?;

    output_compare()
        .arg("batch")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duplicate case id"));
    Ok(())
}
