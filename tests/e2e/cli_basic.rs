//! Basic CLI tests for thumbview
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn thumbview() -> Command {
    cargo_bin_cmd!("thumbview")
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    thumbview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--threshold"))
        .stdout(predicate::str::contains("--overlay"));
}

#[test]
fn help_short_flag_shows_usage() {
    thumbview()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn version_flag_shows_version() {
    thumbview()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Options (Exit Code 3)
// =============================================================================

#[test]
fn unknown_option_returns_exit_code_3() {
    thumbview()
        .args(["--unknown-option", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn missing_paths_returns_exit_code_3() {
    thumbview()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No paths given"));
}

#[test]
fn invalid_threshold_returns_exit_code_3() {
    thumbview()
        .args(["--threshold", "many", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--threshold requires a number"));
}

#[test]
fn invalid_format_returns_exit_code_3() {
    thumbview()
        .args(["--format", "xml", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn missing_config_file_returns_exit_code_3() {
    let temp = TempDir::new().unwrap();
    thumbview()
        .args(["--config"])
        .arg(temp.path().join("absent.toml"))
        .arg(".")
        .assert()
        .code(3);
}

// =============================================================================
// Runtime Errors (Exit Code 2)
// =============================================================================

#[test]
fn nonexistent_path_returns_exit_code_2() {
    let temp = TempDir::new().unwrap();
    thumbview()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg(temp.path().join("does-not-exist.jpg"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist.jpg"));
}
