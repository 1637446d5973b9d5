//! Command: materialize a standalone sysroot.
use anyhow::{Context as _, Result};

use crate::cli::SysrootOpts;
use crate::logging::Logger;
use crate::sysroot::{Job, render_usage};

/// Populate `opts.root` from the build's manifests and print the
/// environment setup hints.
///
/// # Errors
///
/// Returns an error if a prerequisite is missing, the destination is not
/// empty, or any manifest entry fails to materialize.
#[allow(clippy::print_stdout)]
pub fn run(opts: &SysrootOpts, log: &Logger) -> Result<()> {
    let job = Job::new(&opts.build, &opts.root)?;
    log.info(&format!("build: {}", job.build().display()));
    log.info(&format!("root: {}", job.root().display()));

    job.run(log)
        .with_context(|| format!("populating {}", job.root().display()))?;

    println!();
    print!("{}", render_usage(job.root(), &opts.target_sys));
    log.print_log_location();
    Ok(())
}
