//! Best-effort convergence to at most one active unit per workspace app.
//!
//! This is a list-then-stop sweep without any compare-and-swap: two
//! concurrent sweeps may both act on the same snapshot. Stop is close to
//! idempotent, so overlapping stops are harmless.

use anyhow::{Context, Result};
use fleetbox_common::{ComputeUnit, UnitState};
use futures_util::future::join_all;

use crate::application::ports::{UnitInspector, UnitLifecycle};
use crate::domain::outcome::{SingletonReport, StopFailure};

/// Pick the unit to keep when the caller names none: the newest started unit.
fn default_keep(started: &[&ComputeUnit]) -> Option<String> {
    started
        .iter()
        .max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|u| u.name.clone())
}

/// Stop every started unit in `app` whose name is not `keep`.
///
/// Stops are issued in parallel. A failed stop is logged and recorded in the
/// report; it never aborts the batch.
///
/// # Errors
///
/// Returns an error only if the units of `app` cannot be listed.
pub async fn ensure_single_active(
    control: &(impl UnitInspector + UnitLifecycle),
    app: &str,
    keep: Option<&str>,
) -> Result<SingletonReport> {
    let units = control
        .list(app)
        .await
        .with_context(|| format!("listing units of {app}"))?;

    let started: Vec<&ComputeUnit> = units
        .iter()
        .filter(|u| u.state == UnitState::Started)
        .collect();
    let kept = keep.map_or_else(|| default_keep(&started), |k| Some(k.to_string()));

    let surplus: Vec<&ComputeUnit> = started
        .into_iter()
        .filter(|u| Some(u.name.as_str()) != kept.as_deref())
        .collect();

    let outcomes = join_all(surplus.iter().map(|u| async move {
        let result = control.stop(app, &u.id).await;
        (*u, result)
    }))
    .await;

    let mut report = SingletonReport {
        kept,
        ..SingletonReport::default()
    };
    for (unit, result) in outcomes {
        match result {
            Ok(()) => {
                tracing::info!(unit_id = %unit.id, unit_name = %unit.name, "stopped surplus unit");
                report.stopped.push(unit.id.clone());
            }
            Err(e) => {
                tracing::warn!(
                    unit_id = %unit.id,
                    unit_name = %unit.name,
                    error = %e,
                    "failed to stop surplus unit"
                );
                report.failures.push(StopFailure {
                    unit_id: unit.id.clone(),
                    unit_name: unit.name.clone(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }
    Ok(report)
}
