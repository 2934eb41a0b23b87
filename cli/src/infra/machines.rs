//! Machine-control API client implementing the `MachineControl` ports.
//!
//! Speaks the Machines REST dialect: units are `machines` under
//! `/apps/{app}/machines`, app status lives at `/apps/{app}` and resume at
//! `/apps/{app_id}/resume`.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fleetbox_common::{AppStatus, ComputeUnit, FleetConfig, GuestResources, UnitState};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AppControl, MachineSpec, UnitInspector, UnitLifecycle};
use crate::infra::http::{self, CONTROL_TIMEOUT};

/// Authenticated client for the machine-control API.
pub struct MachinesClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    public_domain: String,
}

impl MachinesClient {
    /// Build a client from configuration.
    ///
    /// The bearer credential is read once here. A missing credential is
    /// logged and calls go out unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the token is
    /// not a valid header value.
    pub fn new(config: &FleetConfig) -> Result<Self> {
        if config.control_plane_token.is_none() {
            tracing::warn!("FLEETBOX_CONTROL_PLANE_TOKEN is not set; control-plane calls will be rejected");
        }
        Ok(Self {
            http: http::client()?,
            base_url: config.control_plane_url.trim_end_matches('/').to_string(),
            headers: http::auth_headers(config.control_plane_token.as_deref())?,
            public_domain: config.public_domain.clone(),
        })
    }

    fn machines_url(&self, app: &str) -> String {
        format!("{}/apps/{app}/machines", self.base_url)
    }

    fn machine_url(&self, app: &str, id: &str) -> String {
        format!("{}/apps/{app}/machines/{id}", self.base_url)
    }

    fn unit_from(&self, app: &str, record: MachineRecord) -> ComputeUnit {
        ComputeUnit {
            id: record.id,
            name: record.name,
            region: record.region,
            image: record.config.image,
            resources: record.config.guest,
            state: record.state,
            private_address: record.private_ip,
            public_endpoint: format!("https://{app}.{}", self.public_domain),
            created_at: record.created_at,
        }
    }

    async fn post_action(&self, app: &str, id: &str, action: &str) -> Result<()> {
        let url = format!("{}/{action}", self.machine_url(app, id));
        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        http::ensure_success(response).await?;
        Ok(())
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CreateMachineBody<'a> {
    name: &'a str,
    region: &'a str,
    config: MachineConfigBody<'a>,
}

#[derive(Serialize)]
struct MachineConfigBody<'a> {
    image: &'a str,
    guest: &'a GuestResources,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    env: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
struct MachineRecord {
    id: String,
    #[serde(default)]
    name: String,
    state: UnitState,
    #[serde(default)]
    region: String,
    #[serde(default)]
    private_ip: Option<String>,
    config: MachineConfigRecord,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct MachineConfigRecord {
    #[serde(default)]
    image: String,
    guest: GuestResources,
}

// ── Port implementations ──────────────────────────────────────────────────────

impl UnitLifecycle for MachinesClient {
    async fn create(&self, app: &str, spec: &MachineSpec<'_>) -> Result<ComputeUnit> {
        let url = self.machines_url(app);
        let body = CreateMachineBody {
            name: spec.name,
            region: spec.region,
            config: MachineConfigBody {
                image: spec.image,
                guest: spec.resources,
                env: spec.env,
            },
        };
        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let record: MachineRecord = http::read_json(response).await?;
        Ok(self.unit_from(app, record))
    }

    async fn start(&self, app: &str, id: &str) -> Result<()> {
        self.post_action(app, id, "start").await
    }

    async fn stop(&self, app: &str, id: &str) -> Result<()> {
        self.post_action(app, id, "stop").await
    }

    async fn destroy(&self, app: &str, id: &str) -> Result<()> {
        let url = self.machine_url(app, id);
        let response = self
            .http
            .delete(&url)
            .query(&[("force", "true")])
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("DELETE {url}"))?;
        if http::is_not_found(&response) {
            tracing::debug!(unit_id = %id, "destroy: unit already gone");
            return Ok(());
        }
        http::ensure_success(response).await?;
        Ok(())
    }
}

impl UnitInspector for MachinesClient {
    async fn get(&self, app: &str, id: &str) -> Result<Option<ComputeUnit>> {
        let url = self.machine_url(app, id);
        let response = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        if http::is_not_found(&response) {
            return Ok(None);
        }
        let record: MachineRecord = http::read_json(response).await?;
        Ok(Some(self.unit_from(app, record)))
    }

    async fn list(&self, app: &str) -> Result<Vec<ComputeUnit>> {
        let url = self.machines_url(app);
        let response = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let records: Vec<MachineRecord> = http::read_json(response).await?;
        Ok(records
            .into_iter()
            .map(|r| self.unit_from(app, r))
            .collect())
    }
}

impl AppControl for MachinesClient {
    async fn app_status(&self, app: &str) -> Result<AppStatus> {
        let url = format!("{}/apps/{app}", self.base_url);
        let response = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        http::read_json(response).await
    }

    async fn resume_app(&self, app_id: &str) -> Result<()> {
        let url = format!("{}/apps/{app_id}/resume", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        http::ensure_success(response).await?;
        Ok(())
    }
}
