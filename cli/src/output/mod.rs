//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use fleetbox_common::{ComputeUnit, ExecResult};
use owo_colors::OwoColorize as _;
use serde_json::json;

use crate::application::services::lifecycle::ProvisionedWorkspace;
use crate::domain::outcome::SingletonReport;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Machine-readable renderer for `--json`.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_provisioned(ws: &ProvisionedWorkspace) -> Result<()> {
        json::print(&json!({
            "id": ws.unit.id,
            "name": ws.unit.name,
            "state": ws.unit.state,
            "region": ws.unit.region,
            "private_ip": ws.unit.private_address,
            "endpoint": ws.unit.public_endpoint,
            "partial": ws.partial,
            "resume": ws.resume,
            "singleton": ws.singleton,
        }))
    }
}

/// Renderer selected by the output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn unit(&self, unit: &ComputeUnit) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_unit(unit);
                Ok(())
            }
            Self::Json(_) => json::print(unit),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn units(&self, units: &[ComputeUnit]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_units(units);
                Ok(())
            }
            Self::Json(_) => json::print(units),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn provisioned(&self, ws: &ProvisionedWorkspace) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_provisioned(ws);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_provisioned(ws),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn singleton(&self, report: &SingletonReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_singleton(report);
                Ok(())
            }
            Self::Json(_) => json::print(report),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn exec(&self, result: &ExecResult) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_exec(result);
                Ok(())
            }
            Self::Json(_) => json::print(result),
        }
    }

    /// Report a single completed action, e.g. `stopped m-1`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn action(&self, action: &str, id: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_action(action, id);
                Ok(())
            }
            Self::Json(_) => json::print(&json!({ "id": id, "action": action, "ok": true })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => json::print(&json!({ "version": version })),
        }
    }
}
