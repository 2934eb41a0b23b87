//! `fleetbox stop <unit-id>`: stop a running unit.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run `fleetbox stop`.
///
/// # Errors
///
/// Returns an error carrying the control plane's response if the stop
/// request is rejected.
pub async fn run(app: &AppContext, unit_id: &str) -> Result<ExitCode> {
    app.lifecycle.stop(unit_id).await?;
    app.renderer().action("stopped", unit_id)?;
    Ok(ExitCode::SUCCESS)
}
