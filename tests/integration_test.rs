//! Integration tests for the fraud engine CLI.
//!
//! These tests run the actual binary and verify output against expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

fn engine_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fraud-engine").unwrap();
    cmd.env_remove("FRAUD_PATTERN_THRESHOLD")
        .env_remove("FRAUD_PATTERN_SCOPE");
    cmd
}

/// Run the binary with the given arguments and return stdout
fn run_engine(args: &[&str]) -> String {
    let assert = engine_cmd().args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Trim lines and drop blanks; row order is significant and kept.
fn normalize_csv(csv: &str) -> Vec<String> {
    csv.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn assert_matches_expected(output: &str, expected_file: &str) {
    let expected = fs::read_to_string(test_data_path(expected_file)).unwrap();
    assert_eq!(normalize_csv(output), normalize_csv(&expected));
}

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_sample_a_fraud_scores() {
    let output = run_engine(&[&test_data_path("sample_a.csv")]);
    assert_matches_expected(&output, "expected_a.csv");
}

#[test]
fn test_sample_b_ramp_and_duplicate() {
    let output = run_engine(&[&test_data_path("sample_b_ramp.csv")]);
    assert_matches_expected(&output, "expected_b.csv");
}

#[test]
fn test_sample_c_whitespace_and_bad_rows() {
    let output = run_engine(&[&test_data_path("sample_c_whitespace.csv")]);
    assert_matches_expected(&output, "expected_c.csv");
}

#[test]
fn test_baselines_output() {
    let output = run_engine(&["--baselines", &test_data_path("sample_a.csv")]);
    assert_matches_expected(&output, "expected_baselines_a.csv");
}

#[test]
fn test_output_has_correct_header() {
    let output = run_engine(&[&test_data_path("sample_a.csv")]);
    assert!(output.starts_with("tx,account,status,score"));
}

#[test]
fn test_account_scope_from_environment() {
    let input = temp_csv(
        "type,account,tx,amount\ncredit,1,0,1200\ncredit,2,1,50\ncredit,1,2,1800\n",
    );
    let path = input.path().to_str().unwrap();

    let global = run_engine(&[path]);
    assert!(global.contains("2,1,accepted,0"));

    let assert = engine_cmd()
        .env("FRAUD_PATTERN_SCOPE", "account")
        .arg(path)
        .assert()
        .success();
    let scoped = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(scoped.contains("2,1,pattern,600"));
}

#[test]
fn test_threshold_from_environment() {
    let assert = engine_cmd()
        .env("FRAUD_PATTERN_THRESHOLD", "5000")
        .arg(test_data_path("sample_b_ramp.csv"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!output.contains("pattern"));
    assert!(output.contains("12,1,duplicate,0"));
}

#[test]
fn test_threshold_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("fraud-engine.toml"), "pattern_threshold = 5000\n").unwrap();
    let input = fs::canonicalize(test_data_path("sample_b_ramp.csv")).unwrap();

    let assert = engine_cmd()
        .current_dir(dir.path())
        .arg(&input)
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!output.contains("pattern"));

    let assert = engine_cmd()
        .current_dir(dir.path())
        .env("FRAUD_PATTERN_THRESHOLD", "1000")
        .arg(&input)
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("11,1,pattern,600"));
}

#[test]
fn test_invalid_threshold_error() {
    engine_cmd()
        .env("FRAUD_PATTERN_THRESHOLD", "high")
        .arg(test_data_path("sample_a.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_missing_file_error() {
    engine_cmd()
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    engine_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unknown_flag_error() {
    engine_cmd()
        .args(["--verbose", "whatever.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown flag --verbose"));
}
