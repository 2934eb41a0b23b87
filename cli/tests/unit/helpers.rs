//! Shared test helpers: configuration pointed at a mock server and canned
//! control-plane payloads.

#![allow(dead_code)]

use fleetbox_common::FleetConfig;
use serde_json::{Value, json};

/// Default configuration with every base URL pointed at `base`.
pub fn config_for(base: &str) -> FleetConfig {
    FleetConfig {
        control_plane_url: base.to_string(),
        control_plane_token: Some("cp-token".to_string()),
        gateway_url: base.to_string(),
        directory_url: base.to_string(),
        identity_url: base.to_string(),
        admin_token: Some("admin-token".to_string()),
        ..FleetConfig::default()
    }
}

/// A machine record as the control plane returns it.
pub fn machine_json(id: &str, name: &str, state: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "state": state,
        "region": "iad",
        "private_ip": "fdaa:0:1::7",
        "config": {
            "image": "registry.fly.io/fleetbox-universal:latest",
            "guest": {"cpus": 2, "cpu_kind": "shared", "memory_mb": 2048}
        },
        "created_at": "2026-05-01T10:00:00Z"
    })
}
