//! Readiness waiter: poll a unit until it is started or permanently failed.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::Result;
use fleetbox_common::{ComputeUnit, UnitState};

use crate::application::ports::{Clock, UnitInspector};
use crate::application::services::retry::{PollError, PollSchedule, Probe, poll_until};
use crate::domain::error::WorkspaceError;

pub const FAST_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const SLOW_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_INITIAL_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_TIMEOUT: Duration = Duration::from_secs(120);

/// Two-tier deadline for a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// After this long, poll every second instead of every half second.
    pub initial_timeout: Duration,
    /// After this long, give up with [`WorkspaceError::Timeout`].
    pub max_timeout: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            initial_timeout: DEFAULT_INITIAL_TIMEOUT,
            max_timeout: DEFAULT_MAX_TIMEOUT,
        }
    }
}

impl ReadinessPolicy {
    #[must_use]
    pub fn schedule(&self) -> PollSchedule {
        PollSchedule {
            fast_interval: FAST_POLL_INTERVAL,
            slow_interval: SLOW_POLL_INTERVAL,
            phase_boundary: self.initial_timeout,
            deadline: self.max_timeout,
        }
    }
}

/// Classify one `get` answer for the poll loop.
///
/// A missing unit is still materializing. Transport errors count as "not
/// ready yet" unless they carry a terminal failure.
fn classify(id: &str, answer: Result<Option<ComputeUnit>>) -> Probe<ComputeUnit> {
    match answer {
        Ok(Some(unit)) if unit.state == UnitState::Started => Probe::Ready(unit),
        Ok(Some(unit)) if unit.state.is_terminal_failure() => {
            Probe::Fatal(WorkspaceError::TerminalFailure {
                id: id.to_string(),
                state: unit.state,
            }
            .into())
        }
        Ok(Some(unit)) => Probe::Pending(unit.state.to_string()),
        Ok(None) => Probe::Pending("not found".to_string()),
        Err(e)
            if e.downcast_ref::<WorkspaceError>()
                .is_some_and(WorkspaceError::is_terminal) =>
        {
            Probe::Fatal(e)
        }
        Err(e) => {
            tracing::debug!(unit_id = %id, error = %e, "readiness poll failed; retrying");
            Probe::Pending(format!("error: {e}"))
        }
    }
}

/// Wait until unit `id` in `app` reaches `started`.
///
/// # Errors
///
/// Returns [`WorkspaceError::TerminalFailure`] as soon as the unit is seen
/// `failed` or `destroyed`, and [`WorkspaceError::Timeout`] once
/// `policy.max_timeout` has elapsed.
pub async fn wait_until_ready(
    control: &impl UnitInspector,
    clock: &impl Clock,
    app: &str,
    id: &str,
    policy: &ReadinessPolicy,
) -> Result<ComputeUnit> {
    let schedule = policy.schedule();
    let outcome = poll_until(clock, &schedule, |_| async move {
        classify(id, control.get(app, id).await)
    })
    .await;

    match outcome {
        Ok(unit) => {
            tracing::info!(unit_id = %id, "unit started");
            Ok(unit)
        }
        Err(PollError::Fatal(e)) => Err(e),
        Err(PollError::Timeout {
            elapsed,
            last_observation,
            ..
        }) => Err(WorkspaceError::Timeout {
            id: id.to_string(),
            elapsed,
            last_state: last_observation,
        }
        .into()),
    }
}
