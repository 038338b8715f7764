//! Integration tests for the `panofly` CLI binary.
//!
//! Argument parsing, help output, shell completions and configuration
//! errors, all without a live device.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `panofly` binary with env isolation.
///
/// Clears the `PANOFLY_*` variables and points config directories at a
/// nonexistent path so tests never read a real configuration.
fn panofly_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("panofly");
    cmd.env("HOME", "/tmp/panofly-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/panofly-cli-test-nonexistent");
    for var in [
        "PANOFLY_PROFILE",
        "PANOFLY_DEVICE",
        "PANOFLY_API_KEY",
        "PANOFLY_TEMPLATE",
        "PANOFLY_TEMPLATE_STACK",
        "PANOFLY_OUTPUT",
        "PANOFLY_INSECURE",
        "PANOFLY_TIMEOUT",
        "PANOFLY_VSYS",
        "PANOFLY_USERNAME",
        "PANOFLY_PASSWORD",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = panofly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    panofly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ethernet")
            .and(predicate::str::contains("tunnel"))
            .and(predicate::str::contains("completions"))
            .and(predicate::str::contains("--template-stack")),
    );
}

#[test]
fn test_version_flag() {
    panofly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("panofly"));
}

#[test]
fn test_interface_help_lists_verbs() {
    panofly_cmd().args(["ethernet", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("get-all"))
            .and(predicate::str::contains("edit"))
            .and(predicate::str::contains("delete")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    panofly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("panofly"));
}

#[test]
fn test_completions_zsh() {
    panofly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_unknown_output_format() {
    panofly_cmd()
        .args(["--output", "xml", "ethernet", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_get_requires_name() {
    panofly_cmd().args(["tunnel", "get"]).assert().code(2);
}

#[test]
fn test_delete_requires_names() {
    panofly_cmd().args(["ethernet", "delete"]).assert().code(2);
}

#[test]
fn test_set_requires_file() {
    panofly_cmd()
        .args(["ethernet", "set", "--vsys", "vsys1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--from-file"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_device_reports_config_path() {
    let output = panofly_cmd().args(["ethernet", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No device configured"), "{text}");
}

#[test]
fn test_missing_api_key_is_auth_error() {
    let output = panofly_cmd()
        .args(["--device", "fw.example.com", "-t", "tmpl1", "ethernet", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("No credentials"));
}

#[test]
fn test_missing_scope_is_usage_error() {
    let output = panofly_cmd()
        .args(["--device", "fw.example.com", "--api-key", "k", "tunnel", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No template"));
}

#[test]
fn test_unknown_profile() {
    let output = panofly_cmd()
        .args(["--profile", "lab", "ethernet", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Profile 'lab' not found"));
}

#[test]
fn test_unreachable_device_is_connection_error() {
    panofly_cmd()
        .args([
            "--device",
            "https://127.0.0.1:1",
            "--api-key",
            "k",
            "--template",
            "tmpl1",
            "--timeout",
            "2",
            "ethernet",
            "list",
        ])
        .assert()
        .code(7);
}
