//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `fleetbox_common`; never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use fleetbox_common::{AppStatus, ComputeUnit, ExecResult, GuestResources};

use crate::domain::exec::ExecPayload;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Launch parameters for a new compute unit.
pub struct MachineSpec<'a> {
    /// Derived unit name, e.g. `"ws-acme-web"`.
    pub name: &'a str,
    /// Placement region, e.g. `"iad"`.
    pub region: &'a str,
    /// Runtime image reference.
    pub image: &'a str,
    pub resources: &'a GuestResources,
    /// Environment passed to the unit's init process.
    pub env: &'a HashMap<String, String>,
}

/// A cached session credential for one user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokenEntry {
    pub identity: String,
    pub token: String,
    /// Cache expiry; well inside the token's own validity.
    pub cache_expires_at: Instant,
}

// ── Machine-control Port Traits ───────────────────────────────────────────────

/// Unit lifecycle operations: create, start, stop, destroy.
#[allow(async_fn_in_trait)]
pub trait UnitLifecycle {
    /// Create a unit in `app`.
    async fn create(&self, app: &str, spec: &MachineSpec<'_>) -> Result<ComputeUnit>;
    /// Start a stopped unit.
    async fn start(&self, app: &str, id: &str) -> Result<()>;
    /// Stop a running unit.
    async fn stop(&self, app: &str, id: &str) -> Result<()>;
    /// Destroy a unit. Succeeds when the unit is already gone.
    async fn destroy(&self, app: &str, id: &str) -> Result<()>;
}

/// Unit inspection: point lookup and listing.
#[allow(async_fn_in_trait)]
pub trait UnitInspector {
    /// Fetch a unit, returning `None` when the control plane does not know it.
    async fn get(&self, app: &str, id: &str) -> Result<Option<ComputeUnit>>;
    /// List every unit in `app`.
    async fn list(&self, app: &str) -> Result<Vec<ComputeUnit>>;
}

/// App-level status and resume.
#[allow(async_fn_in_trait)]
pub trait AppControl {
    /// Query the app's suspension status.
    async fn app_status(&self, app: &str) -> Result<AppStatus>;
    /// Resume a suspended app by its identifier.
    async fn resume_app(&self, app_id: &str) -> Result<()>;
}

/// Composite trait; any type implementing all three sub-traits is a `MachineControl`.
pub trait MachineControl: UnitLifecycle + UnitInspector + AppControl {}

/// Blanket implementation: any type implementing all three sub-traits is a `MachineControl`.
impl<T> MachineControl for T where T: UnitLifecycle + UnitInspector + AppControl {}

// ── Execution Ports ───────────────────────────────────────────────────────────

/// Sends a command straight to a unit over the app's shared public endpoint.
#[allow(async_fn_in_trait)]
pub trait UnitTransport {
    /// POST the command to `endpoint`. When `sticky_unit` is set the request
    /// must carry the sticky-routing header with that value.
    async fn post_exec(
        &self,
        endpoint: &str,
        sticky_unit: Option<&str>,
        body: &ExecPayload<'_>,
        timeout: Duration,
    ) -> Result<ExecResult>;
}

/// Resolves a human-readable workspace name to its internal identifier.
#[allow(async_fn_in_trait)]
pub trait WorkspaceDirectory {
    /// Look up `name` among `owner`'s workspaces.
    async fn resolve(&self, owner: &str, name: &str) -> Result<Option<String>>;
}

/// Forwards a command to a workspace through the execution gateway.
#[allow(async_fn_in_trait)]
pub trait GatewayTransport {
    async fn forward(
        &self,
        workspace_id: &str,
        token: &str,
        body: &ExecPayload<'_>,
        timeout: Duration,
    ) -> Result<ExecResult>;
}

// ── Credential Ports ──────────────────────────────────────────────────────────

/// Issues a fresh session credential for a user identity.
#[allow(async_fn_in_trait)]
pub trait IdentityIssuer {
    async fn issue(&self, identity: &str) -> Result<String>;
}

/// Storage for cached session credentials.
///
/// Writes are last-writer-wins; no locking across a miss is implied.
pub trait TokenStore {
    fn get(&self, identity: &str) -> Option<SessionTokenEntry>;
    fn put(&self, entry: SessionTokenEntry);
}

/// Supplies a session credential for an identity, caching as it sees fit.
#[allow(async_fn_in_trait)]
pub trait TokenProvider {
    async fn token_for(&self, identity: &str) -> Result<String>;
}

// ── Time Port ─────────────────────────────────────────────────────────────────

/// Monotonic time and sleeping, injectable so polling can be tested
/// without real delays.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
