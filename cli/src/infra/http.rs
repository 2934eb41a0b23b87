//! Shared reqwest plumbing for the control-plane, gateway, directory and
//! identity adapters.

use std::time::Duration;

use anyhow::{Context, Result};
use fleetbox_common::ExecResult;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::error::{ControlPlaneError, RouteError};

/// Timeout for lifecycle control calls.
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("fleetbox/", env!("CARGO_PKG_VERSION"));

/// Build a client. Per-request timeouts are applied by callers.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("building HTTP client")
}

/// JSON content type plus an optional bearer credential.
///
/// # Errors
///
/// Returns an error if the token contains characters not allowed in a header.
pub fn auth_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("bearer token is not a valid header value")?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Turn a non-success response into a [`ControlPlaneError`] carrying the body.
///
/// # Errors
///
/// Returns the mapped error for any status outside 2xx.
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ControlPlaneError::from_status(status.as_u16(), body).into())
}

/// Decode a successful JSON response.
///
/// # Errors
///
/// Returns an error for non-2xx statuses or an undecodable body.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .context("decoding response body")
}

/// Decode the reply of a unit or gateway exec call.
///
/// A non-2xx response still yields a result when its body reports an exit
/// code or `success` flag; such a result never carries exit code 0.
///
/// # Errors
///
/// Returns [`RouteError::ExecStatus`] for a non-2xx response without a
/// decodable exec body, or an error if a 2xx body cannot be decoded.
pub async fn read_exec_reply(response: Response) -> Result<ExecResult> {
    let status = response.status();
    if status.is_success() {
        let reply: ExecReply = response.json().await.context("decoding exec reply")?;
        return Ok(reply.into_result());
    }
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ExecReply>(&body) {
        Ok(reply) if reply.exit_code.is_some() || reply.success.is_some() => {
            let mut result = reply.into_result();
            if result.exit_code == 0 {
                result.exit_code = 1;
            }
            Ok(result)
        }
        _ => Err(RouteError::ExecStatus {
            status: status.as_u16(),
            body,
        }
        .into()),
    }
}

#[must_use]
pub fn is_not_found(response: &Response) -> bool {
    response.status() == StatusCode::NOT_FOUND
}

/// Exec response body as returned by a unit's agent or by the gateway.
///
/// Units report `exit_code`; the gateway may report `exitCode` or only a
/// boolean `success`.
#[derive(Debug, Default, Deserialize)]
pub struct ExecReply {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default, alias = "exitCode")]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl ExecReply {
    /// Normalize: an explicit exit code wins, then `success: false` means 1,
    /// anything else means 0.
    #[must_use]
    pub fn into_result(self) -> ExecResult {
        let exit_code = match (self.exit_code, self.success) {
            (Some(code), _) => code,
            (None, Some(false)) => 1,
            (None, _) => 0,
        };
        ExecResult {
            exit_code,
            stdout: self.stdout,
            stderr: self.stderr,
        }
    }
}
