use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a compute unit as reported by the control plane.
///
/// The control plane drives every transition; this crate only observes them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    Created,
    Starting,
    Started,
    Stopping,
    Stopped,
    Failed,
    Destroyed,
    /// Any state string this client does not know about (e.g. `replacing`).
    #[serde(other)]
    Unknown,
}

impl UnitState {
    /// Terminal failure states: waiting any longer cannot make the unit usable.
    #[must_use]
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Destroyed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Starting => "starting",
            Self::Started => "started",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
            Self::Destroyed => "destroyed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known unit state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown unit state '{0}' (expected one of: created, starting, started, stopping, stopped, failed, destroyed)")]
pub struct ParseUnitStateError(pub String);

impl FromStr for UnitState {
    type Err = ParseUnitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "starting" => Ok(Self::Starting),
            "started" => Ok(Self::Started),
            "stopping" => Ok(Self::Stopping),
            "stopped" => Ok(Self::Stopped),
            "failed" => Ok(Self::Failed),
            "destroyed" => Ok(Self::Destroyed),
            _ => Err(ParseUnitStateError(s.to_string())),
        }
    }
}

/// CPU and memory allocation for a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestResources {
    pub cpus: u32,
    /// CPU class, e.g. `shared` or `performance`.
    pub cpu_kind: String,
    pub memory_mb: u32,
}

/// An ephemeral, isolated sandbox running one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputeUnit {
    /// Opaque identifier assigned by the control plane.
    pub id: String,
    /// Derived from the project identifier; see `derive_unit_name`.
    pub name: String,
    pub region: String,
    pub image: String,
    pub resources: GuestResources,
    pub state: UnitState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_address: Option<String>,
    /// Shared app domain. Reaching this specific unit requires sticky routing.
    pub public_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Suspension status of the app that groups a project's units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuspensionStatus {
    Suspended,
    /// Every status other than `suspended` (`deployed`, `pending`, ...).
    #[serde(other)]
    Active,
}

/// Status of a workspace app, independent of per-unit state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppStatus {
    pub id: String,
    pub name: String,
    pub status: SuspensionStatus,
}

/// Options accepted when creating a workspace for a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Declared project type, e.g. `react` or `rust`. Drives image selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    /// Explicit image reference; wins over the policy table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Normalized result of running a command in a workspace.
///
/// Always produced, even when the transport fails: in that case
/// `exit_code` is 1 and `stderr` carries the diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    /// Build the result reported when a command could not be delivered.
    #[must_use]
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            stdout: String::new(),
            stderr: diagnostic.into(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
