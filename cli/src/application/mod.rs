//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain`; never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{
    AppControl, Clock, GatewayTransport, IdentityIssuer, MachineControl, MachineSpec,
    ProgressReporter, SessionTokenEntry, TokenProvider, TokenStore, UnitInspector, UnitLifecycle,
    UnitTransport, WorkspaceDirectory,
};
pub use services::exec_router::ExecutionRouter;
pub use services::lifecycle::{CreateFlow, LifecycleManager, LifecycleSettings, ProvisionedWorkspace};
pub use services::token_cache::SessionTokenCache;
