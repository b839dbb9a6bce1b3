//! Single comparison tests.

use super::{fixtures_dir, output_compare};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_check_tolerant_numbers_match() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok"));
}

#[test]
fn test_check_mismatch_reports_line() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("wrong_expected.txt"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "FAILED: Wrong answer at line 1: 1.0 2.0 != 2.0 3.0",
        ));
}

#[test]
fn test_check_no_tolerance_config() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .arg("--config")
        .arg(fixtures.join("strict.yaml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Wrong answer at line 1"));
}

#[test]
fn test_check_no_tolerance_flag() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .arg("--no-tolerance")
        .assert()
        .code(1);
}

#[test]
fn test_check_json_format() -> TestResult {
    let dir = TempDir::new()?;
    let prediction = dir.path().join("prediction.txt");
    let expected = dir.path().join("expected.txt");
    fs::write(&prediction, "[1,2,3]")?;
    fs::write(&expected, "[1, 2, 3]\n")?;

    let output = output_compare()
        .arg("check")
        .arg(&prediction)
        .arg(&expected)
        .args(["--format", "json"])
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["matched"], true);
    assert_eq!(json["message"], "");
    assert_eq!(json["strategy"], "structural");
    Ok(())
}

#[test]
fn test_check_no_structural_flag() -> TestResult {
    let dir = TempDir::new()?;
    let prediction = dir.path().join("prediction.txt");
    let expected = dir.path().join("expected.txt");
    fs::write(&prediction, "[1,2,3]")?;
    fs::write(&expected, "[1, 2, 3]")?;

    output_compare()
        .arg("check")
        .arg(&prediction)
        .arg(&expected)
        .arg("--no-structural")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_check_prediction_from_stdin() {
    let fixtures = fixtures_dir();
    output_compare()
        .args(["check", "-"])
        .arg(fixtures.join("numbers_expected.txt"))
        .write_stdin("3\n1 2\n0.33333333\n")
        .assert()
        .success();
}

#[test]
fn test_check_both_stdin_rejected() {
    output_compare()
        .args(["check", "-", "-"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn test_check_missing_file() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg("/nonexistent/prediction.txt")
        .arg(fixtures.join("numbers_expected.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_check_signaling_nan_warns_and_fails() -> TestResult {
    let dir = TempDir::new()?;
    let prediction = dir.path().join("prediction.txt");
    let expected = dir.path().join("expected.txt");
    fs::write(&prediction, "sNaN")?;
    fs::write(&expected, "1")?;

    output_compare()
        .arg("check")
        .arg(&prediction)
        .arg(&expected)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Comparison failed"))
        .stderr(predicate::str::contains(
            "warning: Enhanced comparison failed",
        ));
    Ok(())
}

#[test]
fn test_check_verbose_shows_strategy() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("decided by line strategy"));
}
