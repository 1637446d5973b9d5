//! Top-level subcommand handlers.
//!
//! Each handler takes its parsed options and the console [`Logger`] and
//! converts library errors to [`anyhow::Error`] at this boundary.
//!
//! [`Logger`]: crate::logging::Logger
pub mod server;
pub mod sysroot;
pub mod version;
