//! Integration tests for argument parsing and startup failures.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn warden() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("warden"));
    cmd.env("NO_COLOR", "1")
        .env_remove("WARDEN_BEARER_TOKEN")
        .env_remove("WARDEN_YES");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    warden().assert().code(2).stderr(predicate::str::contains(
        "Fax service inventory and fax-to-voice DID migration",
    ));
}

#[test]
fn test_cli_help_lists_every_mode() {
    warden()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--print-fax"))
        .stdout(predicate::str::contains("--single-fax-id"))
        .stdout(predicate::str::contains("--migrate-all"))
        .stdout(predicate::str::contains("--migrate-all-verbose"))
        .stdout(predicate::str::contains("--migrate-single-id"))
        .stdout(predicate::str::contains("<ORGANIZATION>"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    warden()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("warden"));
}

// --- Mode selection ---

#[test]
fn test_missing_mode_is_usage_error() {
    warden()
        .arg("ACME")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_two_modes_are_rejected() {
    warden()
        .args(["ACME", "--print-fax", "--migrate-all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_non_numeric_service_id_is_rejected() {
    warden()
        .args(["ACME", "-s", "not-a-number"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_organization_is_usage_error() {
    warden().arg("-p").assert().code(2);
}

// --- Configuration ---

#[test]
fn test_missing_token_fails_before_any_request() {
    warden()
        .args(["ACME", "--print-fax"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARDEN_BEARER_TOKEN"));
}

#[test]
fn test_invalid_page_limit_is_reported() {
    warden()
        .args(["ACME", "--print-fax"])
        .env("WARDEN_BEARER_TOKEN", "tok")
        .env("WARDEN_PAGE_LIMIT", "lots")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unreachable_provider_exits_non_zero() {
    warden()
        .args(["ACME", "--print-fax"])
        .env("WARDEN_BEARER_TOKEN", "tok")
        .env("WARDEN_BASE_URL", "http://127.0.0.1:9/oss/v1/")
        .env("WARDEN_HTTP_TIMEOUT_SECS", "2")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("listing active fax services for ACME"));
}
