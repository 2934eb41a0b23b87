//! Session credential issuance.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::ports::IdentityIssuer;
use crate::infra::http::{self, CONTROL_TIMEOUT};

#[derive(Serialize)]
struct SessionRequest<'a> {
    identity: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    token: String,
}

/// Issues session credentials via `POST {base_url}/sessions`.
pub struct HttpIdentityIssuer {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl HttpIdentityIssuer {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, admin_token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
        })
    }
}

impl IdentityIssuer for HttpIdentityIssuer {
    async fn issue(&self, identity: &str) -> Result<String> {
        let url = format!("{}/sessions", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(http::auth_headers(self.admin_token.as_deref())?)
            .timeout(CONTROL_TIMEOUT)
            .json(&SessionRequest { identity })
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let session: SessionResponse = http::read_json(response).await?;
        Ok(session.token)
    }
}
