//! `fleetbox ensure-single`: stop all but one started unit in an app.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;

#[derive(Args)]
pub struct EnsureSingleArgs {
    /// Name of the unit to keep; defaults to the newest started unit
    #[arg(long)]
    pub keep: Option<String>,
}

/// Run `fleetbox ensure-single`.
///
/// Exits 0 even when some stops failed; failures are listed in the report.
///
/// # Errors
///
/// Returns an error if the app's units cannot be listed.
pub async fn run(app: &AppContext, args: &EnsureSingleArgs) -> Result<ExitCode> {
    let report = app
        .lifecycle
        .ensure_single_active(app.lifecycle.app(), args.keep.as_deref())
        .await?;
    app.renderer().singleton(&report)?;
    Ok(ExitCode::SUCCESS)
}
