//! `fleetbox destroy <unit-id>`: permanently remove a unit.
//!
//! Destroying a unit that is already gone succeeds.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run `fleetbox destroy`.
///
/// # Errors
///
/// Returns an error if the prompt fails or the control plane rejects the
/// request for a reason other than the unit being gone.
pub async fn run(app: &AppContext, unit_id: &str) -> Result<ExitCode> {
    // `confirm` answers its default (no) when non-interactive.
    if !app.non_interactive
        && !app.confirm(&format!("Destroy unit {unit_id}? This cannot be undone."), false)?
    {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }
    app.lifecycle.destroy(unit_id).await?;
    app.renderer().action("destroyed", unit_id)?;
    Ok(ExitCode::SUCCESS)
}
