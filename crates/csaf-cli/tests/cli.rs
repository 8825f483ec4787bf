use assert_cmd::Command;
use predicates::prelude::*;

use std::fs;
use tempfile::TempDir;

const MINIMAL_OK: &str = r#"{"document":{"category":"vex","csaf_version":"2.0","publisher":{"category":"vendor","name":"ACME","namespace":"https://example.com"},"title":"T","tracking":{"current_release_date":"2020-01-01T00:00:00Z","id":"1","initial_release_date":"2020-01-01T00:00:00Z","revision_history":[{"date":"2020-01-01T00:00:00Z","number":"1","summary":"s"}],"status":"final","version":"1"}}}"#;

fn csaf() -> Command {
    let mut cmd = Command::cargo_bin("csaf").unwrap();
    // Keep the run hermetic against ambient toggles.
    for var in [
        "CSAF_BAIL_OUT",
        "CSAF_DEBUG",
        "CSAF_DRY_RUN",
        "CSAF_QUIET",
        "CSAF_STRICT",
        "CSAF_VERBOSE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// The binary runs and shows help
#[test]
fn test_help_command() {
    csaf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CSAF verification tool"));
}

/// Validate without sources is a usage error
#[test]
fn test_validate_without_sources_exits_2() {
    csaf()
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("USAGE"));
}

/// Validate a minimal conforming advisory
#[test]
fn test_validate_valid_file_exits_0() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("advisory.json");
    fs::write(&path, MINIMAL_OK).unwrap();

    csaf()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

/// A missing source file is a content failure, not a usage error
#[test]
fn test_validate_missing_file_exits_1() {
    csaf()
        .args(["validate", "/nonexistent/advisory.json"])
        .assert()
        .code(1);
}

/// Duplicate product identifiers fail with the pinned rule label
#[test]
fn test_validate_duplicate_product_ids_exits_1() {
    let mut doc: serde_json::Value = serde_json::from_str(MINIMAL_OK).unwrap();
    doc["product_tree"] = serde_json::json!({
        "full_product_names": [
            {"name": "Product A", "product_id": "CSAFPID-0001"},
            {"name": "Product B", "product_id": "CSAFPID-0001"}
        ]
    });

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("advisory.json");
    fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    csaf()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-unique product ids"));
}

/// XML input is rejected with the fixed message
#[test]
fn test_validate_xml_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("advisory.json");
    let mut data = "<advisory/>".to_string();
    data.push_str(&" ".repeat(100));
    fs::write(&path, data).unwrap();

    csaf()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("XML IS OUT OF SCOPE"));
}

/// Batch over a directory reports the tally and verdict
#[test]
fn test_validate_directory_batch() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.json"), MINIMAL_OK).unwrap();
    fs::write(temp_dir.path().join("bad.json"), "garbage").unwrap();
    fs::write(temp_dir.path().join("readme.txt"), "skip me").unwrap();

    csaf()
        .args(["validate", temp_dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "checked=2 passed=1 failed=1 ignored=1 FAIL",
        ));
}

/// A clean directory batch exits 0 with an OK verdict
#[test]
fn test_validate_directory_all_pass() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.json"), MINIMAL_OK).unwrap();
    fs::write(temp_dir.path().join("b.json"), MINIMAL_OK).unwrap();

    csaf()
        .args(["validate", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("checked=2 passed=2 failed=0 ignored=0 OK"));
}

/// Quiet mode suppresses the summary line
#[test]
fn test_validate_quiet_suppresses_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("advisory.json");
    fs::write(&path, MINIMAL_OK).unwrap();

    csaf()
        .args(["validate", "--quiet", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// Dry run resolves the invocation but validates nothing
#[test]
fn test_validate_dry_run_exits_0() {
    csaf()
        .args(["validate", "--dry-run", "/nonexistent/advisory.json"])
        .assert()
        .success();
}

/// Bail out stops the batch at the first failure
#[test]
fn test_validate_bail_out() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a-bad.json"), "garbage").unwrap();
    fs::write(temp_dir.path().join("b-good.json"), MINIMAL_OK).unwrap();

    csaf()
        .args(["validate", "--bail-out", temp_dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("checked=1 passed=0 failed=1"));
}

/// The template subcommand emits a parseable configuration skeleton
#[test]
fn test_template_command() {
    let output = csaf().arg("template").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("remote").is_some());
    assert!(parsed.get("local").is_some());
}

/// The report subcommand names the tool and platform
#[test]
fn test_report_command() {
    csaf()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("csaf version"))
        .stdout(predicate::str::contains("platform:"));
}

/// A configuration file can switch on bail-out for a batch
#[test]
fn test_config_file_bail_out() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a-bad.json"), "garbage").unwrap();
    fs::write(temp_dir.path().join("b-good.json"), MINIMAL_OK).unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("conf.json");
    fs::write(&config_path, r#"{"local": {"bail_out": true}}"#).unwrap();

    csaf()
        .args([
            "validate",
            "--config",
            config_path.to_str().unwrap(),
            temp_dir.path().to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed=1"));
}

/// An unreadable configuration path is a usage error
#[test]
fn test_broken_config_exits_2() {
    csaf()
        .args([
            "validate",
            "--config",
            "/nonexistent/conf.json",
            "whatever.json",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is no file"));
}
