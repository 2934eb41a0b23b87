//! Argument parsing, help, and version behavior of the binary.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn fleetbox() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fleetbox"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("FLEETBOX_CONTROL_PLANE_TOKEN");
    cmd
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    fleetbox()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Ephemeral per-project workspaces"));
}

#[test]
fn test_cli_help_lists_commands() {
    fleetbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("exec-named"))
        .stdout(predicate::str::contains("ensure-single"));
}

#[test]
fn test_version_command_shows_version() {
    fleetbox()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleetbox 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = fleetbox()
        .args(["version", "--json"])
        .output()
        .expect("run fleetbox");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_no_color_env_accepts_any_value() {
    for value in ["1", "yes", ""] {
        fleetbox()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("fleetbox 0.1.0"));
    }
}

#[test]
fn test_destroy_with_yes_skips_prompt() {
    fleetbox()
        .env("FLEETBOX_CONTROL_PLANE_URL", "http://127.0.0.1:1")
        .args(["--yes", "destroy", "m-1"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Cancelled").not());
}

#[test]
fn test_unknown_command_fails() {
    fleetbox()
        .arg("teleport")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_create_rejects_no_wait_with_exclusive() {
    fleetbox()
        .args(["create", "demo", "--no-wait", "--exclusive"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_create_rejects_malformed_env_pair() {
    fleetbox()
        .args(["create", "demo", "--env", "NOEQUALS"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_list_rejects_unknown_state() {
    fleetbox()
        .args(["list", "--state", "sleeping"])
        .assert()
        .code(2);
}

#[test]
fn test_destroy_reports_unreachable_control_plane() {
    fleetbox()
        .env("FLEETBOX_CONTROL_PLANE_URL", "http://127.0.0.1:1")
        .args(["--yes", "destroy", "m-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_status_json_error_document() {
    let output = fleetbox()
        .env("FLEETBOX_CONTROL_PLANE_URL", "http://127.0.0.1:1")
        .args(["--json", "status", "m-1"])
        .output()
        .expect("run fleetbox");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["error"], true);
    assert!(value["code"].is_string());
}
