use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::sysroot::DEFAULT_TARGET_SYS;

/// Top-level CLI entry point for the OpenBMC build helpers.
#[derive(Parser, Debug)]
#[command(
    name = "obmc",
    about = "OpenBMC build helpers: standalone sysroots and the build server",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Materialize a standalone sysroot from populate_sysroot manifests
    Sysroot(SysrootOpts),
    /// Run the build server in the foreground, logging its output
    Server(ServerOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sysroot(_) => "sysroot",
            Self::Server(_) => "server",
            Self::Version => "version",
        }
    }
}

/// Options for the `sysroot` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SysrootOpts {
    /// OpenBMC build directory
    #[arg(short, long, env = "OBMC_BUILD_DIR")]
    pub build: PathBuf,

    /// Root directory to create (must be absent or empty)
    #[arg(short, long, env = "OBMC_SYSROOT_DIR")]
    pub root: PathBuf,

    /// Toolchain prefix shown in the usage summary
    #[arg(long, env = "OBMC_TARGET_SYS", default_value = DEFAULT_TARGET_SYS)]
    pub target_sys: String,
}

/// Options for the `server` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ServerOpts {
    /// OpenBMC build directory
    #[arg(short, long, env = "OBMC_BUILD_DIR")]
    pub build: PathBuf,

    /// Server program (default: bitbake from the source tree, then PATH)
    #[arg(long)]
    pub program: Option<PathBuf>,

    /// Arguments passed to the server (default: --server-only)
    #[arg(last = true)]
    pub args: Vec<String>,
}
