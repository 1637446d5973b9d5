//! OpenBMC build helpers.
//!
//! Two tools share one binary:
//!
//! - **[`sysroot`]**: replay the `populate_sysroot` manifests of a finished
//!   build into a standalone directory with a target `sysroot` and a host
//!   `sysroot-native`, usable for cross-compiling outside the build system
//! - **[`server`]**: run the build server in the foreground with its output
//!   mirrored to the console and a log file in the build directory
//!
//! Supporting layers:
//!
//! - **[`cli`]**: argument parsing
//! - **[`commands`]**: subcommand orchestration
//! - **[`logging`]**: console and file logging via `tracing`
//! - **[`error`]**: typed errors for each subsystem
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod server;
pub mod sysroot;
