//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP adapters for the
//! machine-control, directory, identity and gateway services, the unit exec
//! transport, the wall clock, the token store and the environment loader.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod clock;
pub mod config;
pub mod directory;
pub mod gateway;
pub mod http;
pub mod identity;
pub mod machines;
pub mod token_store;
pub mod unit_exec;

pub use clock::TokioClock;
pub use config::load_config;
pub use directory::HttpWorkspaceDirectory;
pub use gateway::HttpGateway;
pub use identity::HttpIdentityIssuer;
pub use machines::MachinesClient;
pub use token_store::InMemoryTokenStore;
pub use unit_exec::HttpUnitTransport;
