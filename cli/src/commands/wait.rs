//! `fleetbox wait <unit-id>`: block until a unit is started.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::readiness::{
    DEFAULT_INITIAL_TIMEOUT, DEFAULT_MAX_TIMEOUT, ReadinessPolicy,
};
use crate::output::progress;

#[derive(Args)]
pub struct WaitArgs {
    pub unit_id: String,

    /// Seconds of fast polling before backing off
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_INITIAL_TIMEOUT.as_secs())]
    pub initial_timeout: u64,

    /// Seconds before giving up
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_MAX_TIMEOUT.as_secs())]
    pub max_timeout: u64,
}

/// Run `fleetbox wait`.
///
/// # Errors
///
/// Returns an error if the unit fails, is destroyed, or does not start
/// before the deadline.
pub async fn run(app: &AppContext, args: &WaitArgs) -> Result<ExitCode> {
    let policy = ReadinessPolicy {
        initial_timeout: Duration::from_secs(args.initial_timeout),
        max_timeout: Duration::from_secs(args.max_timeout),
    };

    let spinner = (!app.is_json() && app.output.show_progress())
        .then(|| progress::spinner(&format!("waiting for {}...", args.unit_id)));
    let outcome = app.lifecycle.wait_with_policy(&args.unit_id, &policy).await;
    if let Some(pb) = &spinner {
        match &outcome {
            Ok(unit) => progress::finish_ok(pb, &format!("unit {} started", unit.id)),
            Err(_) => progress::finish_error(pb, &format!("unit {} not ready", args.unit_id)),
        }
    }

    app.renderer().unit(&outcome?)?;
    Ok(ExitCode::SUCCESS)
}
