//! Integration tests for the `gatewatch` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! config subcommands, and error handling — all without requiring a live
//! gateway.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `gatewatch` binary with env isolation.
///
/// Clears all `GATEWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gatewatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gatewatch");
    cmd.env("HOME", "/tmp/gatewatch-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gatewatch-test-nonexistent")
        .env_remove("GATEWATCH_PROFILE")
        .env_remove("GATEWATCH_GATEWAY")
        .env_remove("GATEWATCH_USERNAME")
        .env_remove("GATEWATCH_PASSWORD")
        .env_remove("GATEWATCH_OUTPUT")
        .env_remove("GATEWATCH_INSECURE")
        .env_remove("GATEWATCH_TIMEOUT");
    cmd
}

/// Same, but with config dirs pointed at a caller-owned temp dir.
fn gatewatch_cmd_with_home(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = gatewatch_cmd();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home);
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
    let output = gatewatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    gatewatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Haivision")
            .and(predicate::str::contains("poll"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    gatewatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gatewatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    gatewatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    gatewatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_path_prints_toml_path() {
    gatewatch_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_then_refuses_overwrite() {
    let home = tempfile::tempdir().unwrap();

    gatewatch_cmd_with_home(home.path())
        .args(["config", "init"])
        .assert()
        .success();

    // A second init without --force fails with a usage exit code.
    let output = gatewatch_cmd_with_home(home.path())
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--force"));

    gatewatch_cmd_with_home(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_lists_template_profile() {
    let home = tempfile::tempdir().unwrap();

    gatewatch_cmd_with_home(home.path())
        .args(["config", "init"])
        .assert()
        .success();

    gatewatch_cmd_with_home(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.default]")
                .and(predicate::str::contains("gateway = ")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = gatewatch_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_poll_without_gateway_fails() {
    let output = gatewatch_cmd().arg("poll").output().unwrap();
    assert_eq!(output.status.code(), Some(1), "Expected general exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("gateway") || text.contains("config init"),
        "Expected a no-config diagnostic:\n{text}"
    );
}

#[test]
fn test_poll_without_credentials_fails_with_auth_code() {
    let output = gatewatch_cmd()
        .args(["poll", "--gateway", "https://127.0.0.1:9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("credentials") || text.contains("GATEWATCH_PASSWORD"),
        "Expected a no-credentials diagnostic:\n{text}"
    );
}

#[test]
fn test_poll_invalid_url_fails_with_usage_code() {
    let output = gatewatch_cmd()
        .args([
            "poll",
            "--gateway",
            "not a url",
            "--username",
            "admin",
            "--password",
            "secret",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    assert!(combined_output(&output).contains("invalid URL"));
}

#[test]
fn test_all_routes_conflicts_with_routes() {
    gatewatch_cmd()
        .args(["poll", "--all-routes", "--routes", "Main"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unknown_profile_fails() {
    let output = gatewatch_cmd()
        .args(["poll", "--profile", "nope"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("nope"));
}
