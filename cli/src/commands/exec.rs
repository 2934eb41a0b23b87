//! `fleetbox exec` and `fleetbox exec-named`: run a command in a workspace.
//!
//! Both commands exit with the remote command's exit code. Transport and
//! resolution failures surface as exit code 1 with the diagnostic on stderr.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use fleetbox_common::ExecResult;

use crate::app::AppContext;
use crate::domain::exec::{DEFAULT_EXEC_TIMEOUT, ExecCommand, ExecRequest, ExecTarget};

#[derive(Args)]
pub struct ExecArgs {
    /// Unit to pin the request to (sticky routing)
    #[arg(long)]
    pub unit: Option<String>,

    /// Public endpoint; defaults to https://<app>.<FLEETBOX_PUBLIC_DOMAIN>
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Working directory inside the workspace
    #[arg(long)]
    pub cwd: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_EXEC_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Do not log failures
    #[arg(long)]
    pub silent: bool,

    /// Command and arguments
    #[arg(last = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

#[derive(Args)]
pub struct ExecNamedArgs {
    /// Owner of the workspace
    #[arg(long)]
    pub owner: String,

    /// Workspace name as shown to the owner
    #[arg(long)]
    pub workspace: String,

    /// Identity the session credential is issued for
    #[arg(long)]
    pub identity: String,

    /// Working directory inside the workspace
    #[arg(long)]
    pub cwd: Option<String>,

    /// Do not log failures
    #[arg(long)]
    pub silent: bool,

    /// Command and arguments
    #[arg(last = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

fn build_command(argv: &[String], cwd: Option<&str>) -> ExecCommand {
    let (program, rest) = argv.split_first().map_or(("", &[][..]), |(p, r)| (p.as_str(), r));
    let command = ExecCommand::new(program).args(rest.iter().cloned());
    match cwd {
        Some(dir) => command.cwd(dir),
        None => command,
    }
}

/// Map a remote exit code onto the process exit code.
fn exit_code(result: &ExecResult) -> ExitCode {
    match u8::try_from(result.exit_code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

/// Run `fleetbox exec`.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub async fn run(app: &AppContext, args: ExecArgs) -> Result<ExitCode> {
    let endpoint = args
        .endpoint
        .unwrap_or_else(|| app.config.public_endpoint(app.lifecycle.app()));
    let request = ExecRequest {
        target: ExecTarget::Direct {
            endpoint,
            unit_id: args.unit,
        },
        command: build_command(&args.command, args.cwd.as_deref()),
        timeout: Duration::from_secs(args.timeout),
        silent: args.silent,
    };
    let result = app.router.exec(&request).await;
    app.renderer().exec(&result)?;
    Ok(exit_code(&result))
}

/// Run `fleetbox exec-named`.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub async fn run_named(app: &AppContext, args: ExecNamedArgs) -> Result<ExitCode> {
    let request = ExecRequest {
        target: ExecTarget::Named {
            owner: args.owner,
            workspace: args.workspace,
            identity: args.identity,
        },
        command: build_command(&args.command, args.cwd.as_deref()),
        timeout: DEFAULT_EXEC_TIMEOUT,
        silent: args.silent,
    };
    let result = app.router.exec(&request).await;
    app.renderer().exec(&result)?;
    Ok(exit_code(&result))
}
