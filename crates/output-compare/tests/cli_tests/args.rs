//! CLI argument tests.

use super::{fixtures_dir, output_compare};
use predicates::prelude::*;

#[test]
fn test_arg_help() {
    output_compare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Compare program output against expected answers",
        ))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_arg_version() {
    output_compare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("output-compare"));
}

#[test]
fn test_arg_missing_subcommand() {
    output_compare().assert().failure();
}

#[test]
fn test_arg_invalid_format() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .args(["--format", "invalid"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_arg_zero_truncate_length_rejected() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .args(["--truncate-length", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("truncate-length"));
}

#[test]
fn test_arg_negative_tolerance_rejected() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .arg("--rtol=-1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rtol"));
}

#[test]
fn test_arg_missing_config_file() {
    let fixtures = fixtures_dir();
    output_compare()
        .arg("check")
        .arg(fixtures.join("numbers_prediction.txt"))
        .arg(fixtures.join("numbers_expected.txt"))
        .args(["--config", "/nonexistent/output-compare.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}
