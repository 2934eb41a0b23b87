//! `fleetbox exec` against endpoints that cannot be reached.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::fleetbox;

#[test]
fn test_exec_unreachable_endpoint_exits_one() {
    fleetbox()
        .args(["exec", "--endpoint", "http://127.0.0.1:1", "--unit", "m-1", "--", "ls", "-la"])
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_exec_json_reports_failure_result() {
    let output = fleetbox()
        .args(["--json", "exec", "--endpoint", "http://127.0.0.1:1", "--silent", "--", "pwd"])
        .output()
        .expect("run fleetbox");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["exit_code"], 1);
    assert_eq!(value["stdout"], "");
    assert!(!value["stderr"].as_str().unwrap_or_default().is_empty());
}

#[test]
fn test_exec_requires_a_command() {
    fleetbox()
        .args(["exec", "--endpoint", "http://127.0.0.1:1"])
        .assert()
        .code(2);
}
