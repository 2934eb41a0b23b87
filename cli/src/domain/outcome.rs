//! Typed results for best-effort steps.
//!
//! Steps such as resuming a suspended app or stopping surplus units must not
//! fail the surrounding flow. They report what happened instead of throwing.

use serde::Serialize;

/// Outcome of a step whose failure is tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum BestEffort {
    /// The step ran (or had nothing to do).
    Done,
    /// The step failed; the flow continued anyway.
    Warning(String),
}

impl BestEffort {
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}

/// A unit that could not be stopped during singleton enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopFailure {
    pub unit_id: String,
    pub unit_name: String,
    pub reason: String,
}

/// Result of converging an app towards a single active unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SingletonReport {
    /// Name of the unit left running, if any was started.
    pub kept: Option<String>,
    /// Identifiers of units successfully stopped.
    pub stopped: Vec<String>,
    pub failures: Vec<StopFailure>,
}

impl SingletonReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
