//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::infra::load_config;
use crate::output::OutputContext;

/// Ephemeral per-project workspaces: provision, route commands, tear down
#[derive(Parser)]
#[command(
    name = "fleetbox",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (the NO_COLOR environment variable also works)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Workspace app to operate on (overrides FLEETBOX_APP_NAME)
    #[arg(long, global = true)]
    pub app: Option<String>,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a workspace unit for a project
    Create(commands::create::CreateArgs),

    /// Run a command on a unit over its public endpoint
    Exec(commands::exec::ExecArgs),

    /// Run a command in a named workspace through the gateway
    ExecNamed(commands::exec::ExecNamedArgs),

    /// Wait until a unit is started
    Wait(commands::wait::WaitArgs),

    /// Start a stopped unit
    Start {
        unit_id: String,
    },

    /// Stop a running unit
    Stop {
        unit_id: String,
    },

    /// Destroy a unit (succeeds if already gone)
    Destroy {
        unit_id: String,
    },

    /// List units in the app
    List(commands::list::ListArgs),

    /// Show one unit
    Status {
        unit_id: String,
    },

    /// Stop every started unit except one
    EnsureSingle(commands::ensure_single::EnsureSingleArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            app,
            yes,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(&OutputContext::new(no_color, quiet), json)?;
            return Ok(ExitCode::SUCCESS);
        }

        let flags = AppFlags {
            no_color,
            quiet,
            json,
            yes,
            app,
        };
        let ctx = AppContext::new(&flags, load_config()?)?;

        match command {
            Command::Create(args) => commands::create::run(&ctx, args).await,
            Command::Exec(args) => commands::exec::run(&ctx, args).await,
            Command::ExecNamed(args) => commands::exec::run_named(&ctx, args).await,
            Command::Wait(args) => commands::wait::run(&ctx, &args).await,
            Command::Start { unit_id } => commands::start::run(&ctx, &unit_id).await,
            Command::Stop { unit_id } => commands::stop::run(&ctx, &unit_id).await,
            Command::Destroy { unit_id } => commands::destroy::run(&ctx, &unit_id).await,
            Command::List(args) => commands::list::run(&ctx, &args).await,
            Command::Status { unit_id } => commands::status::run(&ctx, &unit_id).await,
            Command::EnsureSingle(args) => commands::ensure_single::run(&ctx, &args).await,
            Command::Version => Ok(ExitCode::SUCCESS),
        }
    }
}
