use serde::Deserialize;

/// Process configuration, read from `FLEETBOX_*` environment variables.
///
/// Only the declaration and defaults live here; the binary loads it.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Base URL of the machine-control API.
    #[serde(default = "default_control_plane_url")]
    pub control_plane_url: String,

    /// Bearer credential for the machine-control API.
    /// Missing is tolerated: calls then fail with an auth error from the API.
    #[serde(default)]
    pub control_plane_token: Option<String>,

    /// App that groups workspace units.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Small, pre-warmed image for JS web-framework projects.
    #[serde(default = "default_image_lightweight")]
    pub image_lightweight: String,

    /// Multi-toolchain image used for every other project type.
    #[serde(default = "default_image_universal")]
    pub image_universal: String,

    /// When set, replaces the policy-table choice for every create.
    #[serde(default)]
    pub image_override: Option<String>,

    /// Domain suffix of the shared public endpoint (`<app>.<domain>`).
    #[serde(default = "default_public_domain")]
    pub public_domain: String,

    /// Gateway that forwards commands to a workspace by resolved identifier.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Workspace listing used for name → identifier resolution.
    #[serde(default = "default_directory_url")]
    pub directory_url: String,

    /// Issues short-lived session credentials per user identity.
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Admin credential for the workspace listing and identity issuance.
    #[serde(default)]
    pub admin_token: Option<String>,
}

fn default_control_plane_url() -> String {
    "https://api.machines.dev/v1".to_string()
}

fn default_app_name() -> String {
    "fleetbox-workspaces".to_string()
}

fn default_region() -> String {
    "iad".to_string()
}

fn default_image_lightweight() -> String {
    "registry.fly.io/fleetbox-node:latest".to_string()
}

fn default_image_universal() -> String {
    "registry.fly.io/fleetbox-universal:latest".to_string()
}

fn default_public_domain() -> String {
    "fly.dev".to_string()
}

fn default_gateway_url() -> String {
    "https://gateway.fleetbox.dev".to_string()
}

fn default_directory_url() -> String {
    "https://api.fleetbox.dev/v1".to_string()
}

fn default_identity_url() -> String {
    "https://identity.fleetbox.dev/v1".to_string()
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            control_plane_url: default_control_plane_url(),
            control_plane_token: None,
            app_name: default_app_name(),
            region: default_region(),
            image_lightweight: default_image_lightweight(),
            image_universal: default_image_universal(),
            image_override: None,
            public_domain: default_public_domain(),
            gateway_url: default_gateway_url(),
            directory_url: default_directory_url(),
            identity_url: default_identity_url(),
            admin_token: None,
        }
    }
}

impl FleetConfig {
    /// Public endpoint shared by every unit of `app`.
    #[must_use]
    pub fn public_endpoint(&self, app: &str) -> String {
        format!("https://{app}.{}", self.public_domain)
    }
}
