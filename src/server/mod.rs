//! Build server launcher.
//!
//! The server itself is bitbake's; this module only checks that one can be
//! started for a build directory and routes its merged output to both the
//! console and the build's cooker daemon log through a [`Tee`].
pub mod tee;

pub use tee::Tee;

use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use fs2::FileExt;

use crate::error::ServerError;
use crate::logging::Log;

/// Arguments passed to the server program when none are given.
pub const DEFAULT_SERVER_ARGS: &[&str] = &["--server-only"];

/// Well-known files the server keeps in the build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPaths {
    /// Append-only daemon log.
    pub log: PathBuf,
    /// Lock held by a running server.
    pub lock: PathBuf,
    /// Control socket.
    pub socket: PathBuf,
}

impl ServerPaths {
    /// Paths for the server of `build`.
    #[must_use]
    pub fn for_build(build: &Path) -> Self {
        Self {
            log: build.join("bitbake-cookerdaemon.log"),
            lock: build.join("bitbake.lock"),
            socket: build.join("bitbake.sock"),
        }
    }
}

/// How to launch the server.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Build directory.
    pub build: PathBuf,
    /// Server program; resolved from the source tree or `PATH` when `None`.
    pub program: Option<PathBuf>,
    /// Server arguments; [`DEFAULT_SERVER_ARGS`] when empty.
    pub args: Vec<String>,
}

/// The effective `LC_CTYPE` the way libc picks it: `LC_ALL`, then
/// `LC_CTYPE`, then `LANG`, first non-empty wins.
pub fn effective_locale(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|k| lookup(k))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Whether a locale name selects a UTF-8 codeset.
#[must_use]
pub fn locale_is_utf8(locale: &str) -> bool {
    let lower = locale.to_ascii_lowercase();
    lower.contains("utf-8") || lower.contains("utf8")
}

/// Fail if another process holds the server lock.
///
/// The lock is only tested, never kept: the server takes it itself.
///
/// # Errors
///
/// Returns [`ServerError::AlreadyRunning`] if the lock is held, or
/// [`ServerError::Io`] if the lock file exists but cannot be opened.
pub fn check_not_running(lock: &Path) -> Result<(), ServerError> {
    let file = match OpenOptions::new().read(true).write(true).open(lock) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(ServerError::Io {
                action: "open lock",
                path: lock.to_path_buf(),
                source: e,
            });
        }
    };
    if file.try_lock_exclusive().is_err() {
        return Err(ServerError::AlreadyRunning {
            lock: lock.to_path_buf(),
        });
    }
    FileExt::unlock(&file).ok();
    Ok(())
}

/// Pick the server program: the explicit override, else the bitbake
/// checked out next to the build (`<build>/../../bitbake/bin/bitbake`),
/// else `bitbake` from `PATH`.
#[must_use]
pub fn resolve_program(build: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let in_tree = build.join("../../bitbake/bin/bitbake");
    if in_tree.is_file() {
        in_tree
    } else {
        PathBuf::from("bitbake")
    }
}

/// A prepared server launch.
#[derive(Debug, Clone)]
pub struct Launcher {
    build: PathBuf,
    paths: ServerPaths,
    program: PathBuf,
    args: Vec<String>,
    locale: String,
}

impl Launcher {
    /// Prepare a launch from `opts`, reading the locale from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if the build path cannot be made absolute.
    pub fn new(opts: &ServerOptions) -> Result<Self, ServerError> {
        let build = std::path::absolute(&opts.build).map_err(|e| ServerError::Io {
            action: "resolve",
            path: opts.build.clone(),
            source: e,
        })?;
        let args = if opts.args.is_empty() {
            DEFAULT_SERVER_ARGS.iter().map(ToString::to_string).collect()
        } else {
            opts.args.clone()
        };
        Ok(Self {
            paths: ServerPaths::for_build(&build),
            program: resolve_program(&build, opts.program.as_deref()),
            build,
            args,
            locale: effective_locale(|k| std::env::var(k).ok()),
        })
    }

    /// Override the locale used by the preflight check.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// The server's well-known paths.
    #[must_use]
    pub const fn paths(&self) -> &ServerPaths {
        &self.paths
    }

    /// The program that will be run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check that a server can be started.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::BuildDirMissing`],
    /// [`ServerError::LocaleNotUtf8`] or [`ServerError::AlreadyRunning`].
    pub fn preflight(&self) -> Result<(), ServerError> {
        if !self.build.is_dir() {
            return Err(ServerError::BuildDirMissing {
                path: self.build.clone(),
            });
        }
        if !locale_is_utf8(&self.locale) {
            return Err(ServerError::LocaleNotUtf8 {
                current: self.locale.clone(),
            });
        }
        check_not_running(&self.paths.lock)
    }

    /// Run the server in the foreground until it exits.
    ///
    /// Stdin is the null device; stdout and stderr share one pipe so their
    /// output stays in order, and everything read from it goes to the
    /// console and is appended to the daemon log.
    ///
    /// # Errors
    ///
    /// Returns any [`preflight`](Self::preflight) error,
    /// [`ServerError::Io`] if the log, pipe or process cannot be set up, and
    /// [`ServerError::Exited`] if the server exits unsuccessfully.
    pub fn run(&self, log: &dyn Log) -> Result<(), ServerError> {
        self.preflight()?;
        let io_err = |action: &'static str, path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| ServerError::Io {
                action,
                path,
                source,
            }
        };

        log.stage("Starting build server");
        log.info(&format!("log: {}", self.paths.log.display()));
        log.debug(&format!("socket: {}", self.paths.socket.display()));
        log.debug(&format!(
            "exec {} {} (in {})",
            self.program.display(),
            self.args.join(" "),
            self.build.display()
        ));

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.paths.log)
            .map_err(io_err("open log", &self.paths.log))?;
        let mut tee = Tee::new().with_sink(io::stdout()).with_sink(log_file);

        let (mut reader, writer) = io::pipe().map_err(io_err("create pipe", &self.build))?;
        let stderr = writer
            .try_clone()
            .map_err(io_err("create pipe", &self.build))?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.build)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr)
            .spawn()
            .map_err(io_err("spawn", &self.program))?;

        io::copy(&mut reader, &mut tee).map_err(io_err("relay output", &self.paths.log))?;
        tee.flush().map_err(io_err("flush", &self.paths.log))?;

        let status = child.wait().map_err(io_err("wait", &self.program))?;
        if status.success() {
            Ok(())
        } else {
            Err(ServerError::Exited {
                code: status.code(),
            })
        }
    }
}
