//! End-to-end tests for argument parsing, configuration, and the paths that
//! finish without calling AWS.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run from an empty working directory with a scrubbed environment.
fn stackctl(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stackctl"));
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("STACKCTL_CONFIG")
        .env_remove("STACKCTL_PROJECT")
        .env_remove("STACKCTL_ENVIRONMENT")
        .env_remove("AWS_REGION")
        .env_remove("RUST_LOG");
    cmd
}

fn workdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

// --- Help and version tests ---

#[test]
fn test_help_lists_commands() {
    let dir = workdir();
    stackctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_version_flag_shows_version() {
    let dir = workdir();
    stackctl(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackctl"));
}

#[test]
fn test_version_command_shows_version() {
    let dir = workdir();
    stackctl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "stackctl ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let dir = workdir();
    let output = stackctl(&dir)
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["version"], env!("CARGO_PKG_VERSION"));
}

// --- NO_COLOR convention ---

#[test]
fn test_any_no_color_value_is_accepted() {
    let dir = workdir();
    for value in ["1", "", "true", "yes"] {
        let output = stackctl(&dir)
            .env("NO_COLOR", value)
            .args(["version", "--json"])
            .output()
            .expect("run");
        assert!(
            output.status.success(),
            "NO_COLOR={value:?} rejected: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(json_stdout(&output)["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[test]
fn test_no_color_env_leaves_validate_output_plain() {
    let dir = workdir();
    stackctl(&dir)
        .env("NO_COLOR", "1")
        .args(["validate", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

// --- Argument errors ---

#[test]
fn test_unknown_command_prints_usage_and_exits_2() {
    let dir = workdir();
    stackctl(&dir)
        .arg("destroy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_flag_exits_2() {
    let dir = workdir();
    stackctl(&dir)
        .arg("--force")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_unknown_environment_is_rejected() {
    let dir = workdir();
    stackctl(&dir)
        .args(["status", "--environment", "qa"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("qa"));
}

#[test]
fn test_environment_variable_is_validated_too() {
    let dir = workdir();
    stackctl(&dir)
        .env("STACKCTL_ENVIRONMENT", "qa")
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("qa"));
}

// --- Cleanup confirmation ---

#[test]
fn test_cleanup_without_terminal_is_cancelled() {
    let dir = workdir();
    stackctl(&dir)
        .env("CI", "1")
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleanup cancelled."));
}

#[test]
fn test_cleanup_cancelled_json() {
    let dir = workdir();
    let output = stackctl(&dir)
        .env("CI", "1")
        .args(["cleanup", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["result"], "cancelled");
}

// --- Template validation ---

#[test]
fn test_validate_offline_succeeds() {
    let dir = workdir();
    stackctl(&dir)
        .args(["validate", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline check only"))
        .stdout(predicate::str::contains("SSHAllowedCIDR"));
}

#[test]
fn test_validate_offline_json_reports_outline() {
    let dir = workdir();
    let output = stackctl(&dir)
        .args(["validate", "--offline", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["remote_checked"], false);
    assert_eq!(report["outputs"].as_array().map(Vec::len), Some(11));
    assert!(report["resources"].as_u64().is_some_and(|n| n > 0));
}

// --- Configuration ---

#[test]
fn test_invalid_project_in_config_fails_before_aws() {
    let dir = workdir();
    std::fs::write(dir.path().join("stackctl.yaml"), "project: Not Valid\n").expect("write");
    let output = stackctl(&dir)
        .args(["cleanup", "--yes", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let err = json_stdout(&output);
    assert_eq!(err["error"], true);
    assert_eq!(err["code"], "INVALID_CONFIG");
}

#[test]
fn test_malformed_config_names_the_file() {
    let dir = workdir();
    std::fs::write(dir.path().join("custom.yaml"), "environment: [dev\n").expect("write");
    stackctl(&dir)
        .args(["status", "--config", "custom.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("custom.yaml"));
}

// --- Missing AWS CLI ---

#[test]
fn test_status_without_aws_cli_reports_missing_cli() {
    let dir = workdir();
    let output = stackctl(&dir)
        .env("PATH", dir.path())
        .args(["status", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json_stdout(&output)["code"], "AWS_CLI_MISSING");
}

#[test]
fn test_deploy_without_aws_cli_fails_with_message() {
    let dir = workdir();
    stackctl(&dir)
        .env("PATH", dir.path())
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("AWS CLI"));
}
