//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is constructed once per invocation from the parsed flags and
//! the `FLEETBOX_*` environment. It owns the explicitly wired services; no
//! process-global singletons exist.

use anyhow::Result;
use fleetbox_common::FleetConfig;

use crate::application::services::lifecycle::{
    LifecycleManager, LifecycleSettings, RESUME_SETTLE_DELAY,
};
use crate::application::services::readiness::ReadinessPolicy;
use crate::application::{ExecutionRouter, SessionTokenCache};
use crate::domain::image::ImageCatalog;
use crate::infra::{
    HttpGateway, HttpIdentityIssuer, HttpUnitTransport, HttpWorkspaceDirectory,
    InMemoryTokenStore, MachinesClient, TokioClock,
};
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Lifecycle manager wired to the HTTP control plane.
pub type Lifecycle = LifecycleManager<MachinesClient, TokioClock>;

/// Execution router wired to the HTTP transports.
pub type Router = ExecutionRouter<
    HttpUnitTransport,
    HttpWorkspaceDirectory,
    HttpGateway,
    SessionTokenCache<HttpIdentityIssuer, InMemoryTokenStore, TokioClock>,
>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
    /// Skip interactive prompts (also set by the `CI` env var).
    pub yes: bool,
    /// Overrides `FLEETBOX_APP_NAME`.
    pub app: Option<String>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    pub output: OutputContext,
    pub mode: OutputMode,
    pub config: FleetConfig,
    pub lifecycle: Lifecycle,
    pub router: Router,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or a credential is
    /// not a valid header value.
    pub fn new(flags: &AppFlags, mut config: FleetConfig) -> Result<Self> {
        if let Some(app) = &flags.app {
            config.app_name.clone_from(app);
        }
        let non_interactive = flags.yes || std::env::var("CI").is_ok();
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let settings = LifecycleSettings {
            app: config.app_name.clone(),
            region: config.region.clone(),
            images: ImageCatalog {
                lightweight: config.image_lightweight.clone(),
                universal: config.image_universal.clone(),
            },
            image_override: config.image_override.clone(),
            readiness: ReadinessPolicy::default(),
            resume_settle: RESUME_SETTLE_DELAY,
        };
        let lifecycle = LifecycleManager::new(MachinesClient::new(&config)?, TokioClock, settings);

        let tokens = SessionTokenCache::new(
            HttpIdentityIssuer::new(&config.identity_url, config.admin_token.clone())?,
            InMemoryTokenStore::default(),
            TokioClock,
        );
        let router = ExecutionRouter::new(
            HttpUnitTransport::new()?,
            HttpWorkspaceDirectory::new(&config.directory_url, config.admin_token.as_deref())?,
            HttpGateway::new(&config.gateway_url)?,
            tokens,
        );

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config,
            lifecycle,
            router,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI or `--yes`), returns `default`
    /// immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
