//! Environment-backed configuration loader.

use anyhow::{Context, Result};
use fleetbox_common::FleetConfig;

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "FLEETBOX_";

/// Load [`FleetConfig`] from `FLEETBOX_*` environment variables.
///
/// # Errors
///
/// Returns an error if a variable is present but cannot be parsed.
pub fn load_config() -> Result<FleetConfig> {
    envy::prefixed(ENV_PREFIX)
        .from_env::<FleetConfig>()
        .context("reading FLEETBOX_* configuration from the environment")
}
