//! Direct exec transport: POST to the app's shared endpoint, pinned to one
//! unit by the sticky-routing header.

use std::time::Duration;

use anyhow::{Context, Result};
use fleetbox_common::ExecResult;

use crate::application::ports::UnitTransport;
use crate::domain::exec::ExecPayload;
use crate::domain::workspace::STICKY_ROUTING_HEADER;
use crate::infra::http;

pub struct HttpUnitTransport {
    http: reqwest::Client,
}

impl HttpUnitTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: http::client()?,
        })
    }
}

impl UnitTransport for HttpUnitTransport {
    async fn post_exec(
        &self,
        endpoint: &str,
        sticky_unit: Option<&str>,
        body: &ExecPayload<'_>,
        timeout: Duration,
    ) -> Result<ExecResult> {
        let url = format!("{}/exec", endpoint.trim_end_matches('/'));
        let mut request = self.http.post(&url).timeout(timeout).json(body);
        if let Some(unit_id) = sticky_unit {
            request = request.header(STICKY_ROUTING_HEADER, unit_id);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        http::read_exec_reply(response).await
    }
}
