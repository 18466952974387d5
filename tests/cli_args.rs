//! Integration tests for CLI argument handling
//!
//! Runs the binary with arguments that exit before the server starts.

use std::process::Command;

/// Helper to run the binary with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weather-vault"))
        .args(args)
        .env_remove("LOCAL_STORE_DIR")
        .env_remove("STORE_BACKEND")
        .output()
        .expect("Failed to execute weather-vault")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weather-vault"), "Help should mention weather-vault");
    assert!(stdout.contains("--bucket"), "Help should mention --bucket");
    assert!(stdout.contains("--store"), "Help should mention --store");
    assert!(stdout.contains("PORT"), "Help should mention the PORT variable");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_store_prints_error_and_exits() {
    let output = run_cli(&["--store", "floppy"]);
    assert!(!output.status.success(), "Expected unknown store to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value") || stderr.contains("floppy"),
        "Should print error message about the store: {}",
        stderr
    );
}

#[test]
fn test_local_store_without_dir_fails() {
    let output = run_cli(&["--store", "local"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("local-dir"),
        "Should explain the missing directory: {}",
        stderr
    );
}

#[test]
fn test_invalid_port_is_rejected() {
    let output = run_cli(&["--port", "not-a-port"]);
    assert!(!output.status.success());
}
