//! `MachinesClient` against a mock control plane.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;

use fleetbox_cli::application::ports::{AppControl, MachineSpec, UnitInspector, UnitLifecycle};
use fleetbox_cli::domain::error::ControlPlaneError;
use fleetbox_cli::infra::MachinesClient;
use fleetbox_common::{GuestResources, SuspensionStatus, UnitState};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{config_for, machine_json};

async fn client(server: &MockServer) -> MachinesClient {
    MachinesClient::new(&config_for(&server.uri())).expect("client")
}

#[tokio::test]
async fn get_missing_unit_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("machine not found"))
        .mount(&server)
        .await;

    let found = client(&server).await.get("ws-app", "nope").await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn get_maps_record_and_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/m-1"))
        .and(header("authorization", "Bearer cp-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "started")))
        .mount(&server)
        .await;

    let unit = client(&server).await.get("ws-app", "m-1").await.unwrap().unwrap();

    assert_eq!(unit.state, UnitState::Started);
    assert_eq!(unit.public_endpoint, "https://ws-app.fly.dev");
    assert_eq!(unit.private_address.as_deref(), Some("fdaa:0:1::7"));
}

#[tokio::test]
async fn destroy_twice_succeeds_both_times() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/apps/ws-app/machines/m-1"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/apps/ws-app/machines/m-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let cp = client(&server).await;

    cp.destroy("ws-app", "m-1").await.unwrap();
    cp.destroy("ws-app", "m-1").await.unwrap();
}

#[tokio::test]
async fn stop_failure_carries_remote_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/ws-app/machines/m-1/stop"))
        .respond_with(ResponseTemplate::new(412).set_body_string("machine is replacing"))
        .mount(&server)
        .await;

    let err = client(&server).await.stop("ws-app", "m-1").await.unwrap_err();

    match err.downcast_ref::<ControlPlaneError>() {
        Some(ControlPlaneError::Status { status, body }) => {
            assert_eq!(*status, 412);
            assert_eq!(body, "machine is replacing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let err = client(&server).await.list("ws-app").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ControlPlaneError>(),
        Some(ControlPlaneError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn create_posts_name_region_and_guest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/ws-app/machines"))
        .and(body_partial_json(json!({
            "name": "ws-demo",
            "region": "ams",
            "config": {
                "image": "node:1",
                "guest": {"cpus": 1, "cpu_kind": "shared", "memory_mb": 1024},
                "env": {"PORT": "3000"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-9", "ws-demo", "created")))
        .expect(1)
        .mount(&server)
        .await;
    let resources = GuestResources {
        cpus: 1,
        cpu_kind: "shared".into(),
        memory_mb: 1024,
    };
    let env = HashMap::from([("PORT".to_string(), "3000".to_string())]);
    let spec = MachineSpec {
        name: "ws-demo",
        region: "ams",
        image: "node:1",
        resources: &resources,
        env: &env,
    };

    let unit = client(&server).await.create("ws-app", &spec).await.unwrap();

    assert_eq!(unit.id, "m-9");
    assert_eq!(unit.state, UnitState::Created);
}

#[tokio::test]
async fn app_status_and_resume() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "app_123", "name": "ws-app", "status": "suspended"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apps/app_123/resume"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let cp = client(&server).await;

    let status = cp.app_status("ws-app").await.unwrap();
    assert_eq!(status.status, SuspensionStatus::Suspended);
    cp.resume_app(&status.id).await.unwrap();
}
