//! Application service: workspace lifecycle use-cases.
//!
//! `LifecycleManager` owns the machine-control port and a clock and
//! orchestrates create → resume check → wait-ready, plus the single-step
//! start/stop/destroy/list operations.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::{Context, Result};
use fleetbox_common::{ComputeUnit, CreateOptions, SuspensionStatus, UnitState};

use crate::application::ports::{Clock, MachineControl, MachineSpec, ProgressReporter};
use crate::application::services::readiness::{self, ReadinessPolicy};
use crate::application::services::singleton;
use crate::domain::image::{ImageCatalog, ImageClass, select_image};
use crate::domain::outcome::{BestEffort, SingletonReport};
use crate::domain::workspace::derive_unit_name;

/// Pause after a resume request before the app is used.
pub const RESUME_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Per-deployment settings for a [`LifecycleManager`].
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// App that groups the workspace units.
    pub app: String,
    /// Default placement region.
    pub region: String,
    pub images: ImageCatalog,
    /// Replaces the policy table when set; an explicit per-call image still wins.
    pub image_override: Option<String>,
    pub readiness: ReadinessPolicy,
    pub resume_settle: Duration,
}

/// How `create_workspace` should proceed after the unit is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateFlow {
    /// Block until the unit is started.
    pub wait: bool,
    /// After readiness, stop every other started unit in the app.
    pub exclusive: bool,
}

impl Default for CreateFlow {
    fn default() -> Self {
        Self {
            wait: true,
            exclusive: false,
        }
    }
}

/// Outcome of the `create_workspace` use-case.
#[derive(Debug)]
pub struct ProvisionedWorkspace {
    pub unit: ComputeUnit,
    /// The unit was returned before reaching `started`.
    pub partial: bool,
    /// Result of the suspended-app check.
    pub resume: BestEffort,
    /// Present when the flow was exclusive.
    pub singleton: Option<SingletonReport>,
}

pub struct LifecycleManager<M, C> {
    control: M,
    clock: C,
    settings: LifecycleSettings,
}

impl<M: MachineControl, C: Clock> LifecycleManager<M, C> {
    pub fn new(control: M, clock: C, settings: LifecycleSettings) -> Self {
        Self {
            control,
            clock,
            settings,
        }
    }

    /// App the manager operates on.
    pub fn app(&self) -> &str {
        &self.settings.app
    }

    pub fn control(&self) -> &M {
        &self.control
    }

    /// Create a workspace unit for `project_id`.
    ///
    /// The image comes from `options.image`, then the configured override,
    /// then the project-type policy table. Memory defaults to the image
    /// class's allocation unless `options.memory_mb` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the create call fails or, when `flow.wait` is set,
    /// if the unit fails or does not start in time. Resume and singleton
    /// problems are reported in the result instead.
    pub async fn create_workspace(
        &self,
        project_id: &str,
        options: &CreateOptions,
        flow: CreateFlow,
        reporter: &impl ProgressReporter,
    ) -> Result<ProvisionedWorkspace> {
        let name = derive_unit_name(project_id);
        let project_type = options.project_type.as_deref();
        let image = options
            .image
            .as_deref()
            .or(self.settings.image_override.as_deref())
            .unwrap_or_else(|| select_image(&self.settings.images, project_type));
        let mut resources = ImageClass::for_project_type(project_type).default_resources();
        if let Some(memory_mb) = options.memory_mb {
            resources.memory_mb = memory_mb;
        }
        let region = options.region.as_deref().unwrap_or(&self.settings.region);
        let app = self.app();

        reporter.step(&format!("creating unit {name}..."));
        let spec = MachineSpec {
            name: &name,
            region,
            image,
            resources: &resources,
            env: &options.env,
        };
        let created = self
            .control
            .create(app, &spec)
            .await
            .with_context(|| format!("creating unit {name} in {app}"))?;
        tracing::info!(unit_id = %created.id, unit_name = %name, image, "unit created");

        let resume = self.resume_if_suspended().await;
        if let BestEffort::Warning(reason) = &resume {
            reporter.warn(&format!("app resume check failed: {reason}"));
        }

        if !flow.wait {
            return Ok(ProvisionedWorkspace {
                unit: created,
                partial: true,
                resume,
                singleton: None,
            });
        }

        reporter.step("waiting for unit to start...");
        let unit = self.wait_until_ready(&created.id).await?;
        reporter.success(&format!("unit {} started", unit.id));

        let singleton = if flow.exclusive {
            Some(self.exclusive_sweep(&name, reporter).await)
        } else {
            None
        };

        Ok(ProvisionedWorkspace {
            unit,
            partial: false,
            resume,
            singleton,
        })
    }

    async fn exclusive_sweep(&self, keep: &str, reporter: &impl ProgressReporter) -> SingletonReport {
        match singleton::ensure_single_active(&self.control, self.app(), Some(keep)).await {
            Ok(report) => {
                for failure in &report.failures {
                    reporter.warn(&format!(
                        "could not stop {}: {}",
                        failure.unit_name, failure.reason
                    ));
                }
                report
            }
            Err(e) => {
                tracing::warn!(error = %e, "singleton sweep skipped");
                reporter.warn(&format!("singleton sweep skipped: {e:#}"));
                SingletonReport {
                    kept: Some(keep.to_string()),
                    ..SingletonReport::default()
                }
            }
        }
    }

    /// Resume the app if the control plane reports it suspended, then give
    /// it a moment to settle. Never fails.
    pub async fn resume_if_suspended(&self) -> BestEffort {
        match self.try_resume().await {
            Ok(()) => BestEffort::Done,
            Err(e) => {
                tracing::warn!(app = %self.app(), error = %e, "app resume check failed; continuing");
                BestEffort::Warning(format!("{e:#}"))
            }
        }
    }

    async fn try_resume(&self) -> Result<()> {
        let app = self.app();
        let status = self
            .control
            .app_status(app)
            .await
            .with_context(|| format!("querying status of {app}"))?;
        if status.status != SuspensionStatus::Suspended {
            return Ok(());
        }
        tracing::info!(app, app_id = %status.id, "app suspended; resuming");
        self.control
            .resume_app(&status.id)
            .await
            .with_context(|| format!("resuming {app}"))?;
        self.clock.sleep(self.settings.resume_settle).await;
        Ok(())
    }

    /// Poll unit `id` until it is started, using the configured policy.
    ///
    /// # Errors
    ///
    /// See [`readiness::wait_until_ready`].
    pub async fn wait_until_ready(&self, id: &str) -> Result<ComputeUnit> {
        self.wait_with_policy(id, &self.settings.readiness).await
    }

    /// Like [`Self::wait_until_ready`] with caller-supplied deadlines.
    ///
    /// # Errors
    ///
    /// See [`readiness::wait_until_ready`].
    pub async fn wait_with_policy(&self, id: &str, policy: &ReadinessPolicy) -> Result<ComputeUnit> {
        readiness::wait_until_ready(&self.control, &self.clock, self.app(), id, policy).await
    }

    /// # Errors
    ///
    /// Returns an error on transport or control-plane failure. A missing
    /// unit is `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<ComputeUnit>> {
        self.control.get(self.app(), id).await
    }

    /// # Errors
    ///
    /// Returns an error carrying the control plane's response on failure.
    pub async fn start(&self, id: &str) -> Result<()> {
        self.control
            .start(self.app(), id)
            .await
            .with_context(|| format!("starting unit {id}"))?;
        tracing::info!(unit_id = %id, "start requested");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error carrying the control plane's response on failure.
    pub async fn stop(&self, id: &str) -> Result<()> {
        self.control
            .stop(self.app(), id)
            .await
            .with_context(|| format!("stopping unit {id}"))?;
        tracing::info!(unit_id = %id, "stop requested");
        Ok(())
    }

    /// Destroy unit `id`. Destroying a unit that no longer exists succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the control plane's response on failure.
    pub async fn destroy(&self, id: &str) -> Result<()> {
        self.control
            .destroy(self.app(), id)
            .await
            .with_context(|| format!("destroying unit {id}"))?;
        tracing::info!(unit_id = %id, "unit destroyed");
        Ok(())
    }

    /// List units in the app, optionally only those in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the control plane cannot be queried.
    pub async fn list(&self, state: Option<UnitState>) -> Result<Vec<ComputeUnit>> {
        let app = self.app();
        let units = self
            .control
            .list(app)
            .await
            .with_context(|| format!("listing units of {app}"))?;
        Ok(match state {
            Some(wanted) => units.into_iter().filter(|u| u.state == wanted).collect(),
            None => units,
        })
    }

    /// Stop every started unit in `app` except `keep`.
    ///
    /// # Errors
    ///
    /// Returns an error only if listing fails; stop failures are in the report.
    pub async fn ensure_single_active(&self, app: &str, keep: Option<&str>) -> Result<SingletonReport> {
        singleton::ensure_single_active(&self.control, app, keep).await
    }
}
