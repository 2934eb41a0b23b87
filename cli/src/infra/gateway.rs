//! Gateway exec transport.

use std::time::Duration;

use anyhow::{Context, Result};
use fleetbox_common::ExecResult;

use crate::application::ports::GatewayTransport;
use crate::domain::exec::ExecPayload;
use crate::infra::http;

/// Forwards commands to `{base_url}/workspaces/{id}/exec`.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl GatewayTransport for HttpGateway {
    async fn forward(
        &self,
        workspace_id: &str,
        token: &str,
        body: &ExecPayload<'_>,
        timeout: Duration,
    ) -> Result<ExecResult> {
        let url = format!("{}/workspaces/{workspace_id}/exec", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(http::auth_headers(Some(token))?)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        http::read_exec_reply(response).await
    }
}
