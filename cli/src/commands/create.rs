//! `fleetbox create <project-id>`: provision a workspace unit.

use std::collections::HashMap;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use fleetbox_common::CreateOptions;

use crate::app::AppContext;
use crate::application::services::lifecycle::CreateFlow;
use crate::output::TerminalReporter;

#[derive(Args)]
pub struct CreateArgs {
    /// Project identifier; the unit name is derived from it
    pub project_id: String,

    /// Declared project type (e.g. react, rust); selects the image
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Explicit image reference, bypassing the image policy
    #[arg(long)]
    pub image: Option<String>,

    /// Memory in MB, overriding the image class default
    #[arg(long, value_name = "MB")]
    pub memory: Option<u32>,

    /// Placement region (defaults to FLEETBOX_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Environment variable for the unit, repeatable
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Return as soon as the unit is created
    #[arg(long)]
    pub no_wait: bool,

    /// Stop every other started unit in the app once this one is ready
    #[arg(long, conflicts_with = "no_wait")]
    pub exclusive: bool,
}

/// Parse `KEY=VALUE`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Run `fleetbox create`.
///
/// # Errors
///
/// Returns an error if creation fails or, when waiting, if the unit fails or
/// does not start in time.
pub async fn run(app: &AppContext, args: CreateArgs) -> Result<ExitCode> {
    let options = CreateOptions {
        project_type: args.project_type,
        image: args.image,
        memory_mb: args.memory,
        region: args.region,
        env: args.env.into_iter().collect::<HashMap<_, _>>(),
    };
    let flow = CreateFlow {
        wait: !args.no_wait,
        exclusive: args.exclusive,
    };

    let reporter = TerminalReporter::new(&app.output);
    let outcome = if app.is_json() {
        app.lifecycle
            .create_workspace(&args.project_id, &options, flow, &SilentReporter)
            .await
    } else {
        app.lifecycle
            .create_workspace(&args.project_id, &options, flow, &reporter)
            .await
    };
    let ws = match outcome {
        Ok(ws) => ws,
        Err(e) => {
            reporter.abandon("create failed");
            return Err(e);
        }
    };

    app.renderer().provisioned(&ws)?;
    Ok(ExitCode::SUCCESS)
}

/// Progress sink for `--json`, where stdout carries only the document.
struct SilentReporter;

impl crate::application::ports::ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
