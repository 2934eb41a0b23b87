//! Output styles using the owo-colors stylesheet pattern

use fleetbox_common::UnitState;
use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success messages (green)
    pub success: Style,
    /// Warning messages (yellow)
    pub warning: Style,
    /// Error messages (red)
    pub error: Style,
    /// Info messages (blue)
    pub info: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// Headers/section titles
    pub header: Style,
    /// Unit identifiers in tables
    pub id: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
        self.id = Style::new().magenta();
    }

    /// Style for a unit state: green when usable, red when terminal,
    /// yellow while transitioning.
    #[must_use]
    pub fn state(&self, state: UnitState) -> Style {
        match state {
            UnitState::Started => self.success,
            UnitState::Failed | UnitState::Destroyed => self.error,
            UnitState::Stopped | UnitState::Unknown => self.dim,
            UnitState::Created | UnitState::Starting | UnitState::Stopping => self.warning,
        }
    }
}
