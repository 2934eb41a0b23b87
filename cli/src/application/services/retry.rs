//! Two-phase bounded polling.
//!
//! `poll_until` repeatedly runs a probe until it reports `Ready` or `Fatal`,
//! sleeping `fast_interval` between attempts until `phase_boundary` has
//! elapsed and `slow_interval` afterwards. Nothing but a `Fatal` probe ends
//! the loop before `deadline`. Time comes from the injected [`Clock`].

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::application::ports::Clock;

/// Polling cadence and deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub fast_interval: Duration,
    pub slow_interval: Duration,
    /// Elapsed time after which polling switches to `slow_interval`.
    pub phase_boundary: Duration,
    /// Elapsed time after which polling gives up.
    pub deadline: Duration,
}

/// Polling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fast,
    Slow,
}

impl PollSchedule {
    /// Phase in effect once `elapsed` has passed.
    #[must_use]
    pub fn phase_at(&self, elapsed: Duration) -> Phase {
        if elapsed > self.phase_boundary {
            Phase::Slow
        } else {
            Phase::Fast
        }
    }

    #[must_use]
    pub fn interval(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Fast => self.fast_interval,
            Phase::Slow => self.slow_interval,
        }
    }
}

/// What a single probe observed.
pub enum Probe<T> {
    /// Done; stop polling and return the value.
    Ready(T),
    /// Not yet; the string describes what was observed, for diagnostics.
    Pending(String),
    /// Unrecoverable; stop polling and raise.
    Fatal(anyhow::Error),
}

/// Why polling stopped without a value.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fatal(anyhow::Error),

    #[error(
        "gave up after {attempts} attempts in {:.1}s (last observed: {last_observation})",
        .elapsed.as_secs_f64()
    )]
    Timeout {
        elapsed: Duration,
        attempts: u32,
        last_observation: String,
    },
}

/// Run `probe` on `schedule` until it is ready, fatal, or the deadline passes.
///
/// The probe receives the 1-based attempt number.
///
/// # Errors
///
/// Returns [`PollError::Fatal`] with the probe's error, or
/// [`PollError::Timeout`] once `schedule.deadline` has elapsed.
pub async fn poll_until<T, F, Fut>(
    clock: &impl Clock,
    schedule: &PollSchedule,
    mut probe: F,
) -> Result<T, PollError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Probe<T>>,
{
    let started = clock.now();
    let mut attempts = 0u32;
    let mut phase = Phase::Fast;
    let mut last_observation = String::from("nothing");

    loop {
        attempts += 1;
        match probe(attempts).await {
            Probe::Ready(value) => return Ok(value),
            Probe::Fatal(e) => return Err(PollError::Fatal(e)),
            Probe::Pending(observed) => last_observation = observed,
        }

        let elapsed = clock.now().saturating_duration_since(started);
        if elapsed >= schedule.deadline {
            return Err(PollError::Timeout {
                elapsed,
                attempts,
                last_observation,
            });
        }

        let next = schedule.phase_at(elapsed);
        if next != phase {
            tracing::debug!(
                attempts,
                elapsed_ms = elapsed.as_millis(),
                "switching to slow polling"
            );
            phase = next;
        }

        // Never sleep past the deadline; the final attempt lands on it.
        let remaining = schedule.deadline - elapsed;
        clock.sleep(schedule.interval(phase).min(remaining)).await;
    }
}
