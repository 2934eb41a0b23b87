//! `fleetbox status <unit-id>`: show one unit.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::error::WorkspaceError;

/// Run `fleetbox status`.
///
/// # Errors
///
/// Returns [`WorkspaceError::NotFound`] when the control plane does not know
/// the unit, or the transport error if it cannot be reached.
pub async fn run(app: &AppContext, unit_id: &str) -> Result<ExitCode> {
    let unit = app
        .lifecycle
        .get(unit_id)
        .await?
        .ok_or_else(|| WorkspaceError::NotFound(unit_id.to_string()))?;
    app.renderer().unit(&unit)?;
    Ok(ExitCode::SUCCESS)
}
