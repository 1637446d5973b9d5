//! Domain-specific error types for the OpenBMC build helpers.
//!
//! Library modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?`.
//!
//! - [`SysrootError`]: manifest discovery, path rewriting, copying
//! - [`ServerError`]: build server preflight and launch

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while materializing a sysroot.
///
/// Every variant is fatal for the run: materialization stops immediately and
/// the destination is left as-is for the operator to inspect and remove.
#[derive(Error, Debug)]
pub enum SysrootError {
    /// A directory that must exist before the run starts is absent.
    #[error("{what} does not exist: {}", path.display())]
    PrerequisiteMissing {
        /// Short name of the missing prerequisite (e.g. `"build dir"`).
        what: &'static str,
        /// Path that was checked.
        path: PathBuf,
    },

    /// The destination root exists and already has content.
    #[error("root dir already exists and is not empty: {}", path.display())]
    DestinationNotEmpty {
        /// The destination root.
        path: PathBuf,
    },

    /// Something already exists where a tree or symlink must be created.
    #[error("destination already exists: {}", path.display())]
    DestinationConflict {
        /// The conflicting destination path.
        path: PathBuf,
    },

    /// A manifest line could not be mapped into the sysroot.
    #[error("cannot rewrite '{source_path}': {reason}")]
    PathRewriteFailure {
        /// The manifest line as read.
        source_path: String,
        /// Why the rewrite failed.
        reason: String,
    },

    /// An underlying filesystem operation failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being done (e.g. `"copy"`, `"create directory"`).
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl SysrootError {
    /// Build an [`SysrootError::Io`] for `path`.
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors raised by the build server launcher.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The build directory passed on the command line does not exist.
    #[error("build dir does not exist: {}", path.display())]
    BuildDirMissing {
        /// The build directory.
        path: PathBuf,
    },

    /// The process locale cannot represent UTF-8 file names.
    #[error("please use a locale setting which supports UTF-8 (current: '{current}')")]
    LocaleNotUtf8 {
        /// The effective locale value, empty if none was set.
        current: String,
    },

    /// Another server already holds the build lock.
    #[error(
        "bitbake server is already running ({}), please run `bitbake -m` to kill",
        lock.display()
    )]
    AlreadyRunning {
        /// The lock file that is held.
        lock: PathBuf,
    },

    /// The server process exited unsuccessfully.
    #[error("server exited with status {}", code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Exited {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// An I/O operation of the launcher failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being done.
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
