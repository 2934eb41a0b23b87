//! `fleetbox list`: list units in the workspace app.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use fleetbox_common::UnitState;

use crate::app::AppContext;

#[derive(Args)]
pub struct ListArgs {
    /// Only show units in this state (e.g. started, stopped)
    #[arg(long)]
    pub state: Option<UnitState>,
}

/// Run `fleetbox list`.
///
/// # Errors
///
/// Returns an error if the control plane cannot be queried.
pub async fn run(app: &AppContext, args: &ListArgs) -> Result<ExitCode> {
    let units = app.lifecycle.list(args.state).await?;
    app.renderer().units(&units)?;
    Ok(ExitCode::SUCCESS)
}
