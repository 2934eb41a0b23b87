//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `reqwest`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod exec;
pub mod image;
pub mod outcome;
pub mod workspace;

pub use error::{ControlPlaneError, RouteError, WorkspaceError};
pub use exec::{ExecCommand, ExecRequest, ExecTarget};
pub use image::{ImageCatalog, ImageClass, select_image};
pub use outcome::{BestEffort, SingletonReport, StopFailure};
pub use workspace::{STICKY_ROUTING_HEADER, derive_unit_name};
