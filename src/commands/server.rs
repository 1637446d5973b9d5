//! Command: run the build server in the foreground.
use anyhow::Result;

use crate::cli::ServerOpts;
use crate::logging::Logger;
use crate::server::{Launcher, ServerOptions};

/// Launch the server for `opts.build` and wait for it to exit.
///
/// # Errors
///
/// Returns an error if a preflight check fails, the server cannot be
/// started, or it exits unsuccessfully.
pub fn run(opts: &ServerOpts, log: &Logger) -> Result<()> {
    let launcher = Launcher::new(&ServerOptions {
        build: opts.build.clone(),
        program: opts.program.clone(),
        args: opts.args.clone(),
    })?;
    let result = launcher.run(log);
    log.print_log_location();
    Ok(result?)
}
