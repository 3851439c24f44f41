//! Smoke tests for the vsh CLI
//!
//! None of these reach a browser: they stop at argument parsing, listing or
//! configuration validation.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_KEYS: [&str; 7] = [
    "VSH_CONFIG",
    "VSH_BASE_URL",
    "BASE_URL",
    "VSH_USERNAME",
    "VSH_PASSWORD",
    "USER_EMAIL",
    "VSH_WORKERS",
];

/// A vsh command isolated from the caller's environment
fn vsh() -> Command {
    let mut cmd = Command::cargo_bin("vsh").expect("vsh binary should exist");
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.env("RUST_LOG", "warn");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    vsh()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    vsh()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("test"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_no_args_fails() {
    vsh().assert().failure();
}

#[test]
fn test_test_subcommand_help() {
    vsh()
        .args(["test", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--storage-state"))
        .stdout(predicate::str::contains("--headed"));
}

// ============================================================================
// List
// ============================================================================

#[test]
fn test_list_all() {
    vsh()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Landing Page"))
        .stdout(predicate::str::contains("Models Page Tests"))
        .stdout(predicate::str::contains("34 tests in 8 suites"));
}

#[test]
fn test_list_filter_by_tag() {
    vsh()
        .args(["list", "--filter", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expected to fail"))
        .stdout(predicate::str::contains("2 tests in 1 suite"));
}

// ============================================================================
// Configuration errors exit with 2
// ============================================================================

#[test]
fn test_missing_base_url() {
    vsh()
        .arg("test")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url is empty"));
}

#[test]
fn test_unreadable_config_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    vsh()
        .args(["test", "--config"])
        .arg(&missing)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_auth_requires_credentials() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("vsh.yaml");
    fs::write(&config, "base_url: https://hub.test\n").unwrap();

    vsh()
        .args(["auth", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("VSH_USERNAME"));
}

#[test]
fn test_filter_matching_nothing() {
    vsh()
        .args(["test", "--filter", "no such test"])
        .env("VSH_BASE_URL", "https://hub.test")
        .env("VSH_USERNAME", "qa@pictorlabs.ai")
        .env("VSH_PASSWORD", "secret")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no tests match"));
}

#[test]
fn test_zero_workers_rejected() {
    vsh()
        .args(["test", "--workers", "0"])
        .env("VSH_BASE_URL", "https://hub.test")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("workers"));
}
