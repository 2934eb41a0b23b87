//! Direct and gateway exec paths over HTTP.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use fleetbox_cli::application::{ExecutionRouter, SessionTokenCache};
use fleetbox_cli::domain::STICKY_ROUTING_HEADER;
use fleetbox_cli::domain::exec::{DEFAULT_EXEC_TIMEOUT, ExecCommand, ExecRequest, ExecTarget};
use fleetbox_cli::infra::{
    HttpGateway, HttpIdentityIssuer, HttpUnitTransport, HttpWorkspaceDirectory,
    InMemoryTokenStore, TokioClock,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type HttpRouter = ExecutionRouter<
    HttpUnitTransport,
    HttpWorkspaceDirectory,
    HttpGateway,
    SessionTokenCache<HttpIdentityIssuer, InMemoryTokenStore, TokioClock>,
>;

fn router(directory: &str, identity: &str, gateway: &str) -> HttpRouter {
    ExecutionRouter::new(
        HttpUnitTransport::new().unwrap(),
        HttpWorkspaceDirectory::new(directory, Some("admin-token")).unwrap(),
        HttpGateway::new(gateway).unwrap(),
        SessionTokenCache::new(
            HttpIdentityIssuer::new(identity, Some("admin-token".into())).unwrap(),
            InMemoryTokenStore::default(),
            TokioClock,
        ),
    )
}

async fn exec_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stdout": "hello\n", "stderr": "", "exit_code": 0
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn known_unit_sets_sticky_header() {
    let server = MockServer::start().await;
    exec_ok(&server).await;
    let r = router("http://127.0.0.1:1", "http://127.0.0.1:1", "http://127.0.0.1:1");

    let result = r
        .exec_direct(&server.uri(), Some("m-42"), &ExecCommand::new("echo"), DEFAULT_EXEC_TIMEOUT, false)
        .await;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "hello\n");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get(STICKY_ROUTING_HEADER).unwrap(),
        "m-42"
    );
}

#[tokio::test]
async fn unknown_unit_omits_sticky_header() {
    let server = MockServer::start().await;
    exec_ok(&server).await;
    let r = router("http://127.0.0.1:1", "http://127.0.0.1:1", "http://127.0.0.1:1");

    r.exec_direct(&server.uri(), None, &ExecCommand::new("echo"), DEFAULT_EXEC_TIMEOUT, true)
        .await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get(STICKY_ROUTING_HEADER).is_none());
}

#[tokio::test]
async fn direct_payload_is_structured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(json!({
            "command": "npm",
            "args": ["test"],
            "cwd": "/workspace/app",
            "timeout_ms": 60000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stdout": "", "stderr": "1 failing", "exit_code": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    let r = router("http://127.0.0.1:1", "http://127.0.0.1:1", "http://127.0.0.1:1");
    let cmd = ExecCommand::new("npm").args(["test"]).cwd("/workspace/app");

    let result = r
        .exec_direct(&server.uri(), Some("m-1"), &cmd, DEFAULT_EXEC_TIMEOUT, true)
        .await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.stderr, "1 failing");
}

#[tokio::test]
async fn unreachable_endpoint_yields_exit_one() {
    let r = router("http://127.0.0.1:1", "http://127.0.0.1:1", "http://127.0.0.1:1");

    let result = r
        .exec_direct("http://127.0.0.1:1", Some("m-1"), &ExecCommand::new("ls"), DEFAULT_EXEC_TIMEOUT, true)
        .await;

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.is_empty());
    assert!(!result.stderr.is_empty());
}

async fn directory_and_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "wk_1", "name": "web-old", "owner": "acme"},
            {"id": "wk_2", "name": "web", "owner": "acme"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_partial_json(json!({"identity": "user1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sess-1"})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn gateway_path_forwards_with_cached_token() {
    let server = MockServer::start().await;
    directory_and_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/workspaces/wk_2/exec"))
        .and(header("authorization", "Bearer sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stdout": "ok", "stderr": "", "success": true
        })))
        .expect(2)
        .mount(&server)
        .await;
    let uri = server.uri();
    let r = router(&uri, &uri, &uri);

    for _ in 0..2 {
        let result = r
            .exec_by_name("acme", "web", "user1", &ExecCommand::new("ls"), false)
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "ok");
    }
}

#[tokio::test]
async fn gateway_success_false_maps_to_exit_one() {
    let server = MockServer::start().await;
    directory_and_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/workspaces/wk_2/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stdout": "", "stderr": "no such file", "success": false
        })))
        .mount(&server)
        .await;
    let uri = server.uri();
    let r = router(&uri, &uri, &uri);

    let result = r
        .exec_by_name("acme", "web", "user1", &ExecCommand::new("cat").args(["x"]), true)
        .await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.stderr, "no such file");
}

#[tokio::test]
async fn unreachable_gateway_returns_result_not_error() {
    let server = MockServer::start().await;
    directory_and_identity(&server).await;
    let uri = server.uri();
    let r = router(&uri, &uri, "http://127.0.0.1:1");

    let result = r
        .exec_by_name("acme", "web", "user1", &ExecCommand::new("ls"), true)
        .await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.stdout, "");
    assert!(!result.stderr.is_empty());
}

#[tokio::test]
async fn gateway_ignores_caller_timeout() {
    let server = MockServer::start().await;
    directory_and_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/workspaces/wk_2/exec"))
        .and(body_partial_json(json!({"command": "make", "timeout_ms": 60000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stdout": "built", "stderr": "", "exitCode": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    let uri = server.uri();
    let r = router(&uri, &uri, &uri);
    let request = ExecRequest {
        target: ExecTarget::Named {
            owner: "acme".into(),
            workspace: "web".into(),
            identity: "user1".into(),
        },
        command: ExecCommand::new("make"),
        timeout: Duration::from_secs(5),
        silent: true,
    };

    let result = r.exec(&request).await;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "built");
}

#[tokio::test]
async fn gateway_error_status_keeps_reported_output() {
    let server = MockServer::start().await;
    directory_and_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/workspaces/wk_2/exec"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "stdout": "partial out", "stderr": "killed", "exitCode": 2
        })))
        .mount(&server)
        .await;
    let uri = server.uri();
    let r = router(&uri, &uri, &uri);

    let result = r
        .exec_by_name("acme", "web", "user1", &ExecCommand::new("make"), true)
        .await;

    assert_eq!(result.exit_code, 2);
    assert_eq!(result.stdout, "partial out");
    assert_eq!(result.stderr, "killed");
}

#[tokio::test]
async fn unit_error_status_without_body_is_an_exec_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let r = router("http://127.0.0.1:1", "http://127.0.0.1:1", "http://127.0.0.1:1");

    let result = r
        .exec_direct(&server.uri(), Some("m-1"), &ExecCommand::new("ls"), DEFAULT_EXEC_TIMEOUT, true)
        .await;

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("Exec endpoint returned HTTP 502"), "{}", result.stderr);
    assert!(!result.stderr.contains("Control plane"), "{}", result.stderr);
}
