//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Callers that apply policy by error kind recover them
//! with `downcast_ref`.

use std::time::Duration;

use fleetbox_common::UnitState;
use thiserror::Error;

// ── Workspace errors ──────────────────────────────────────────────────────────

/// Errors raised while driving a unit towards readiness.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Workspace unit {id} entered terminal state '{state}' while starting.")]
    TerminalFailure { id: String, state: UnitState },

    #[error(
        "Workspace unit {id} was not ready after {:.1}s (last observed: {last_state}).",
        .elapsed.as_secs_f64()
    )]
    Timeout {
        id: String,
        elapsed: Duration,
        last_state: String,
    },

    #[error("Workspace unit {0} not found.")]
    NotFound(String),
}

impl WorkspaceError {
    /// Returns `true` for errors that must stop readiness polling at once.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::TerminalFailure { .. })
    }
}

// ── Control-plane errors ──────────────────────────────────────────────────────

/// Non-success responses from the machine-control API.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("Control plane rejected the credential (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Control plane returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl ControlPlaneError {
    /// Classify a non-success HTTP status and its body.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 || status == 403 {
            Self::Unauthorized { status, body }
        } else {
            Self::Status { status, body }
        }
    }
}

// ── Routing errors ────────────────────────────────────────────────────────────

/// Errors resolving a command target.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No workspace named '{name}' for owner '{owner}'.")]
    UnknownWorkspace { owner: String, name: String },

    #[error("Identity service returned no token for '{0}'.")]
    EmptyToken(String),

    /// A unit or the gateway answered an exec call with a non-2xx status and
    /// no exit code in the body.
    #[error("Exec endpoint returned HTTP {status}: {body}")]
    ExecStatus { status: u16, body: String },
}
