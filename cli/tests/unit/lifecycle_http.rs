//! `LifecycleManager` end to end over HTTP.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use fleetbox_cli::application::ports::ProgressReporter;
use fleetbox_cli::application::services::lifecycle::{
    CreateFlow, LifecycleManager, LifecycleSettings,
};
use fleetbox_cli::application::services::readiness::ReadinessPolicy;
use fleetbox_cli::domain::BestEffort;
use fleetbox_cli::domain::image::ImageCatalog;
use fleetbox_cli::infra::{MachinesClient, TokioClock};
use fleetbox_common::{CreateOptions, UnitState};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{config_for, machine_json};

struct Quiet;

impl ProgressReporter for Quiet {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

fn manager(server: &MockServer) -> LifecycleManager<MachinesClient, TokioClock> {
    let config = config_for(&server.uri());
    LifecycleManager::new(
        MachinesClient::new(&config).unwrap(),
        TokioClock,
        LifecycleSettings {
            app: "ws-app".into(),
            region: "iad".into(),
            images: ImageCatalog {
                lightweight: "node:1".into(),
                universal: "universal:1".into(),
            },
            image_override: None,
            readiness: ReadinessPolicy {
                initial_timeout: Duration::from_millis(200),
                max_timeout: Duration::from_secs(2),
            },
            resume_settle: Duration::from_millis(10),
        },
    )
}

#[tokio::test]
async fn create_resumes_suspended_app_and_waits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/ws-app/machines"))
        .and(body_partial_json(json!({"name": "ws-demo", "config": {"image": "node:1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "created")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "app_1", "name": "ws-app", "status": "suspended"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apps/app_1/resume"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/m-1"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/m-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "started")))
        .mount(&server)
        .await;
    let opts = CreateOptions {
        project_type: Some("next".into()),
        ..CreateOptions::default()
    };

    let ws = manager(&server)
        .create_workspace("demo", &opts, CreateFlow::default(), &Quiet)
        .await
        .unwrap();

    assert!(!ws.partial);
    assert_eq!(ws.resume, BestEffort::Done);
    assert_eq!(ws.unit.state, UnitState::Started);
}

#[tokio::test]
async fn status_endpoint_failure_does_not_block_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/ws-app/machines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "created")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let flow = CreateFlow {
        wait: false,
        exclusive: false,
    };

    let ws = manager(&server)
        .create_workspace("demo", &CreateOptions::default(), flow, &Quiet)
        .await
        .unwrap();

    assert!(ws.partial);
    assert!(ws.resume.is_warning());
}

#[tokio::test]
async fn failed_unit_aborts_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/m-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "failed")))
        .expect(1)
        .mount(&server)
        .await;

    let err = manager(&server).wait_until_ready("m-1").await.unwrap_err();

    assert!(err.to_string().contains("failed"), "{err}");
}

#[tokio::test]
async fn stuck_unit_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/ws-app/machines/m-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machine_json("m-1", "ws-demo", "starting")))
        .mount(&server)
        .await;

    let err = manager(&server).wait_until_ready("m-1").await.unwrap_err();

    assert!(err.to_string().contains("starting"), "{err}");
}
