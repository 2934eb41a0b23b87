//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document on
//! stdout. Failures use the error object below.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// ```json
/// { "error": true, "message": "...", "code": "..." }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Stable error code for an `anyhow` error, by the typed cause it carries.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::error::{ControlPlaneError, RouteError, WorkspaceError};

    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<WorkspaceError>() {
            return match e {
                WorkspaceError::TerminalFailure { .. } => "TERMINAL_FAILURE",
                WorkspaceError::Timeout { .. } => "TIMEOUT",
                WorkspaceError::NotFound(_) => "NOT_FOUND",
            };
        }
        if let Some(e) = cause.downcast_ref::<ControlPlaneError>() {
            return match e {
                ControlPlaneError::Unauthorized { .. } => "UNAUTHORIZED",
                ControlPlaneError::Status { .. } => "CONTROL_PLANE_ERROR",
            };
        }
        if cause.downcast_ref::<RouteError>().is_some() {
            return "ROUTE_ERROR";
        }
    }
    "ERROR"
}
