//! Command: print version information.

/// Version string, from the build environment when available.
#[must_use]
pub fn version() -> &'static str {
    option_env!("OBMC_TOOLS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the tool version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("obmc {}", version());
}
