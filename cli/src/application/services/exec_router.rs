//! Command execution routing.
//!
//! Two addressing paths share one result contract. The direct path posts to
//! the app's shared endpoint and pins the request to a unit with the
//! sticky-routing header. The gateway path resolves a workspace name to its
//! identifier and forwards through the gateway with a cached session
//! credential. Neither path raises: every failure becomes an `ExecResult`
//! with `exit_code` 1 and the diagnostic in `stderr`.

use std::time::Duration;

use anyhow::{Context, Result};
use fleetbox_common::ExecResult;

use crate::application::ports::{
    GatewayTransport, TokenProvider, UnitTransport, WorkspaceDirectory,
};
use crate::domain::error::RouteError;
use crate::domain::exec::{ExecCommand, ExecRequest, ExecTarget, GATEWAY_EXEC_TIMEOUT};

pub struct ExecutionRouter<U, D, G, T> {
    units: U,
    directory: D,
    gateway: G,
    tokens: T,
}

impl<U, D, G, T> ExecutionRouter<U, D, G, T>
where
    U: UnitTransport,
    D: WorkspaceDirectory,
    G: GatewayTransport,
    T: TokenProvider,
{
    pub fn new(units: U, directory: D, gateway: G, tokens: T) -> Self {
        Self {
            units,
            directory,
            gateway,
            tokens,
        }
    }

    /// Route `request` to its target.
    pub async fn exec(&self, request: &ExecRequest) -> ExecResult {
        match &request.target {
            ExecTarget::Direct { endpoint, unit_id } => {
                self.exec_direct(
                    endpoint,
                    unit_id.as_deref(),
                    &request.command,
                    request.timeout,
                    request.silent,
                )
                .await
            }
            ExecTarget::Named {
                owner,
                workspace,
                identity,
            } => {
                self.exec_by_name(owner, workspace, identity, &request.command, request.silent)
                    .await
            }
        }
    }

    /// Run `command` on the unit behind `endpoint`.
    ///
    /// When `unit_id` is known the request is pinned to it; otherwise the
    /// shared domain may route to any unit of the app.
    pub async fn exec_direct(
        &self,
        endpoint: &str,
        unit_id: Option<&str>,
        command: &ExecCommand,
        timeout: Duration,
        silent: bool,
    ) -> ExecResult {
        if unit_id.is_none() {
            tracing::debug!(endpoint, "exec without unit id; request is not pinned");
        }
        let payload = command.payload(timeout);
        let outcome = self
            .units
            .post_exec(endpoint, unit_id, &payload, timeout)
            .await
            .with_context(|| format!("exec on {endpoint}"));
        normalize(outcome, silent)
    }

    /// Run `command` in `owner`'s workspace named `workspace`, acting as
    /// `identity`.
    pub async fn exec_by_name(
        &self,
        owner: &str,
        workspace: &str,
        identity: &str,
        command: &ExecCommand,
        silent: bool,
    ) -> ExecResult {
        let outcome = self.forward_by_name(owner, workspace, identity, command).await;
        normalize(outcome, silent)
    }

    async fn forward_by_name(
        &self,
        owner: &str,
        workspace: &str,
        identity: &str,
        command: &ExecCommand,
    ) -> Result<ExecResult> {
        let workspace_id = self
            .directory
            .resolve(owner, workspace)
            .await
            .with_context(|| format!("resolving workspace {owner}/{workspace}"))?
            .ok_or_else(|| RouteError::UnknownWorkspace {
                owner: owner.to_string(),
                name: workspace.to_string(),
            })?;
        let token = self.tokens.token_for(identity).await?;
        let payload = command.payload(GATEWAY_EXEC_TIMEOUT);
        self.gateway
            .forward(&workspace_id, &token, &payload, GATEWAY_EXEC_TIMEOUT)
            .await
            .with_context(|| format!("gateway exec in {owner}/{workspace}"))
    }
}

fn normalize(outcome: Result<ExecResult>, silent: bool) -> ExecResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            if !silent {
                tracing::error!(error = %format!("{e:#}"), "command execution failed");
            }
            ExecResult::failure(format!("{e:#}"))
        }
    }
}
