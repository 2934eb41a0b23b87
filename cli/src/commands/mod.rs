//! Command implementations

pub mod create;
pub mod destroy;
pub mod ensure_single;
pub mod exec;
pub mod list;
pub mod start;
pub mod status;
pub mod stop;
pub mod version;
pub mod wait;
