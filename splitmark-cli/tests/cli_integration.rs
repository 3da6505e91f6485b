//! Integration tests for the splitmark CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn splitmark() -> Command {
    Command::cargo_bin("splitmark").unwrap()
}

#[test]
fn test_process_text_output() {
    splitmark()
        .args(["process", "-q", "-i"])
        .arg(fixture_path("sample.txt"))
        .args(["--min-length", "100", "--max-length", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Introduction"))
        .stdout(predicate::str::contains("# Method"))
        .stdout(predicate::str::contains("<!--split-->"));
}

#[test]
fn test_document_below_min_length_is_one_segment() {
    splitmark()
        .args(["process", "-q", "-i"])
        .arg(fixture_path("sample.txt"))
        .args(["--min-length", "800", "--max-length", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dr. Smith"))
        .stdout(predicate::str::contains("<!--split-->").not());
}

#[test]
fn test_process_chinese_text() {
    splitmark()
        .args(["process", "-q", "-i"])
        .arg(fixture_path("chinese.txt"))
        .args(["--min-length", "100", "--max-length", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 概述"))
        .stdout(predicate::str::contains("<!--split-->"));
}

#[test]
fn test_json_output() {
    let output = splitmark()
        .args(["process", "-q", "-f", "json", "-i"])
        .arg(fixture_path("sample.txt"))
        .args(["--min-length", "100", "--max-length", "300"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &value[0];
    assert_eq!(report["source"], fixture_path("sample.txt"));

    let decisions = report["decisions"].as_array().unwrap();
    assert!(decisions.len() >= 3);
    assert_eq!(decisions.last().unwrap()["kind"], "document_end");
    assert_eq!(report["segments"].as_array().unwrap().len(), decisions.len());
}

#[test]
fn test_json_debug_output_has_trace() {
    splitmark()
        .args(["process", "-q", "--debug", "-f", "json", "-i"])
        .arg(fixture_path("sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trace\""))
        .stdout(predicate::str::contains("\"event\": \"candidate\""));
}

#[test]
fn test_json_input() {
    splitmark()
        .args(["process", "-q", "-f", "markdown", "-i"])
        .arg(fixture_path("sample.json"))
        .args(["--min-length", "100", "--max-length", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Segment 1"))
        .stdout(predicate::str::contains("### Release notes"))
        .stdout(predicate::str::contains("*Total segments:"));
}

#[test]
fn test_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");

    splitmark()
        .args(["process", "-q", "-f", "markdown", "-i"])
        .arg(fixture_path("*.txt"))
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let markdown = fs::read_to_string(out_dir.join("sample.txt.md")).unwrap();
    assert!(markdown.starts_with("# tests/fixtures/sample.txt"));
    assert!(out_dir.join("chinese.txt.md").exists());
}

#[test]
fn test_skip_existing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("sample.txt.txt"), "existing").unwrap();

    splitmark()
        .args(["process", "-q", "--skip-existing", "-i"])
        .arg(fixture_path("sample.txt"))
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("sample.txt.txt")).unwrap(),
        "existing"
    );
}

#[test]
fn test_summary_goes_to_stderr() {
    let temp_dir = TempDir::new().unwrap();

    splitmark()
        .args(["process", "--sequential", "-i"])
        .arg(fixture_path("*.txt"))
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 2 of 2 file(s)"));
}

#[test]
fn test_failed_file_sets_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ not a paragraph list").unwrap();

    splitmark()
        .args(["process", "-q", "-i"])
        .arg(&broken)
        .arg(fixture_path("sample.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("# Introduction"))
        .stderr(predicate::str::contains("Failed files:"))
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_nonexistent_file() {
    splitmark()
        .args(["process", "-i", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_min_length_above_max_length() {
    splitmark()
        .args(["process", "-i"])
        .arg(fixture_path("sample.txt"))
        .args(["--min-length", "100", "--max-length", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_parallel_and_sequential_conflict() {
    splitmark()
        .args(["process", "--parallel", "--sequential", "-i"])
        .arg(fixture_path("sample.txt"))
        .assert()
        .failure();
}

#[test]
fn test_help_output() {
    splitmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("generate-config"))
        .stdout(predicate::str::contains("show-config"));
}

#[test]
fn test_list_formats() {
    splitmark()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("splitmark.toml");

    splitmark()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    splitmark()
        .arg("validate")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Configuration is valid!"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[document]\nmin_length = 900\nmax_length = 100\n").unwrap();

    splitmark()
        .arg("validate")
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Configuration is invalid!"));
}

#[test]
fn test_config_file_is_applied() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("splitmark.toml");
    fs::write(&config, "[document]\nmin_length = 100\nmax_length = 300\n").unwrap();

    splitmark()
        .args(["process", "-q", "-i"])
        .arg(fixture_path("sample.txt"))
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("<!--split-->"));
}

#[test]
fn test_force_split_before_heading_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("splitmark.toml");
    fs::write(&config, "[advanced]\nforce_split_before_heading = true\n").unwrap();

    splitmark()
        .args(["process", "-q", "-f", "json", "--min-length", "500", "-i"])
        .arg(fixture_path("sample.txt"))
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"heading\""));

    splitmark()
        .args(["process", "-q", "--min-length", "500", "-i"])
        .arg(fixture_path("sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("<!--split-->").not());
}

#[test]
fn test_show_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("splitmark.toml");
    fs::write(&config, "[advanced]\nsearch_window = 25\n").unwrap();

    splitmark()
        .arg("show-config")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("search_window = 25"))
        .stdout(predicate::str::contains("max_length = 1000"));
}
