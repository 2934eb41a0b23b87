//! Human-readable terminal renderer.

use fleetbox_common::{ComputeUnit, ExecResult};
use owo_colors::OwoColorize as _;

use crate::application::services::lifecycle::ProvisionedWorkspace;
use crate::domain::outcome::{BestEffort, SingletonReport};
use crate::output::OutputContext;

/// Renders lifecycle and exec results as terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("fleetbox {version}");
        }
    }

    pub fn render_action(&self, action: &str, id: &str) {
        self.ctx.success(&format!("{action} {id}"));
    }

    /// Key-value view of one unit.
    pub fn render_unit(&self, unit: &ComputeUnit) {
        if self.ctx.quiet {
            return;
        }
        let state = unit
            .state
            .as_str()
            .style(self.ctx.styles.state(unit.state))
            .to_string();
        self.ctx.kv("Id:      ", &unit.id.style(self.ctx.styles.id).to_string());
        self.ctx.kv("Name:    ", &unit.name);
        self.ctx.kv("State:   ", &state);
        self.ctx.kv("Region:  ", &unit.region);
        self.ctx.kv("Image:   ", &unit.image);
        self.ctx.kv(
            "Guest:   ",
            &format!(
                "{} {} cpu, {} MB",
                unit.resources.cpus, unit.resources.cpu_kind, unit.resources.memory_mb
            ),
        );
        if let Some(addr) = &unit.private_address {
            self.ctx.kv("Private: ", addr);
        }
        self.ctx.kv("Endpoint:", &unit.public_endpoint);
        if let Some(created) = unit.created_at {
            self.ctx.kv("Created: ", &created.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        }
    }

    /// One line per unit.
    pub fn render_units(&self, units: &[ComputeUnit]) {
        if self.ctx.quiet {
            return;
        }
        if units.is_empty() {
            self.ctx.info("No units.");
            return;
        }
        println!(
            "  {}",
            format!("{:<16} {:<30} {:<10} {:<6} IMAGE", "ID", "NAME", "STATE", "REGION")
                .style(self.ctx.styles.header)
        );
        for unit in units {
            // Pad before styling so ANSI codes do not skew the columns.
            let id = format!("{:<16}", unit.id);
            let state = format!("{:<10}", unit.state.as_str());
            println!(
                "  {} {:<30} {} {:<6} {}",
                id.style(self.ctx.styles.id),
                unit.name,
                state.style(self.ctx.styles.state(unit.state)),
                unit.region,
                unit.image.style(self.ctx.styles.dim),
            );
        }
    }

    /// Summary of a `create` flow.
    pub fn render_provisioned(&self, ws: &ProvisionedWorkspace) {
        if let BestEffort::Warning(reason) = &ws.resume {
            self.ctx.warn(&format!("resume check: {reason}"));
        }
        if ws.partial {
            self.ctx.warn(&format!(
                "unit {} is still {}; run `fleetbox wait {}`",
                ws.unit.id, ws.unit.state, ws.unit.id
            ));
        }
        self.render_unit(&ws.unit);
        if let Some(report) = &ws.singleton {
            self.render_singleton(report);
        }
    }

    pub fn render_singleton(&self, report: &SingletonReport) {
        match &report.kept {
            Some(kept) => self.ctx.info(&format!("keeping {kept}")),
            None => self.ctx.info("no started units"),
        }
        for id in &report.stopped {
            self.ctx.success(&format!("stopped {id}"));
        }
        for failure in &report.failures {
            self.ctx.warn(&format!(
                "could not stop {} ({}): {}",
                failure.unit_name, failure.unit_id, failure.reason
            ));
        }
    }

    /// Command output goes through verbatim; it is never suppressed by `quiet`.
    pub fn render_exec(&self, result: &ExecResult) {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
        if result.exit_code != 0 && !self.ctx.quiet {
            eprintln!(
                "  {} exited with code {}",
                "✗".style(self.ctx.styles.error),
                result.exit_code
            );
        }
    }
}
