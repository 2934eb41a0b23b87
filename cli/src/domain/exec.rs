//! Command execution request types.
//!
//! Commands travel as structured fields (program, argv, working directory)
//! rather than a shell string with a `cd` prefix.

use std::time::Duration;

use serde::Serialize;

/// Default per-call timeout on the direct path.
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(60);

/// Fixed per-call timeout on the gateway path.
pub const GATEWAY_EXEC_TIMEOUT: Duration = Duration::from_secs(60);

/// A command to run inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCommand {
    pub command: String,
    pub args: Vec<String>,
    pub working_directory: Option<String>,
}

impl ExecCommand {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_directory: None,
        }
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Wire body sent to a unit or to the gateway.
    #[must_use]
    pub fn payload(&self, timeout: Duration) -> ExecPayload<'_> {
        ExecPayload {
            command: &self.command,
            args: &self.args,
            cwd: self.working_directory.as_deref(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// JSON body of an exec call.
#[derive(Debug, Serialize)]
pub struct ExecPayload<'a> {
    pub command: &'a str,
    pub args: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<&'a str>,
    pub timeout_ms: u64,
}

/// Where a command should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecTarget {
    /// Straight to the app's public endpoint, pinned to `unit_id` when known.
    Direct {
        endpoint: String,
        unit_id: Option<String>,
    },
    /// Resolve `workspace` for `owner`, then forward through the gateway
    /// using a session credential for `identity`.
    Named {
        owner: String,
        workspace: String,
        identity: String,
    },
}

/// A routed command execution.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    pub target: ExecTarget,
    pub command: ExecCommand,
    /// Ignored on the gateway path, which uses [`GATEWAY_EXEC_TIMEOUT`].
    pub timeout: Duration,
    /// Suppresses error logging; the result contract is unchanged.
    pub silent: bool,
}
