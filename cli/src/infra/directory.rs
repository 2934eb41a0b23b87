//! Workspace-name resolution against the directory API.

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::application::ports::WorkspaceDirectory;
use crate::infra::http::{self, CONTROL_TIMEOUT};

#[derive(Debug, Deserialize)]
struct WorkspaceRecord {
    id: String,
    name: String,
}

/// Resolves `owner/name` to a workspace identifier using the admin credential.
pub struct HttpWorkspaceDirectory {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpWorkspaceDirectory {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the admin token
    /// is not a valid header value.
    pub fn new(base_url: &str, admin_token: Option<&str>) -> Result<Self> {
        if admin_token.is_none() {
            tracing::warn!("FLEETBOX_ADMIN_TOKEN is not set; workspace-name lookups will be rejected");
        }
        Ok(Self {
            http: http::client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: http::auth_headers(admin_token)?,
        })
    }
}

impl WorkspaceDirectory for HttpWorkspaceDirectory {
    async fn resolve(&self, owner: &str, name: &str) -> Result<Option<String>> {
        let url = format!("{}/workspaces", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("owner", owner), ("name", name)])
            .headers(self.headers.clone())
            .timeout(CONTROL_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let records: Vec<WorkspaceRecord> = http::read_json(response).await?;
        // The listing filter may be a prefix match; only an exact name counts.
        Ok(records.into_iter().find(|w| w.name == name).map(|w| w.id))
    }
}
