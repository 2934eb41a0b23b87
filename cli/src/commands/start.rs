//! `fleetbox start <unit-id>`: start a stopped unit.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run `fleetbox start`.
///
/// # Errors
///
/// Returns an error carrying the control plane's response if the start
/// request is rejected.
pub async fn run(app: &AppContext, unit_id: &str) -> Result<ExitCode> {
    app.lifecycle.start(unit_id).await?;
    app.renderer().action("started", unit_id)?;
    if !app.is_json() {
        app.output.info(&format!("Wait for it: fleetbox wait {unit_id}"));
    }
    Ok(ExitCode::SUCCESS)
}
