use std::process::ExitCode;

use clap::Parser;
use obmc_tools::cli::{Cli, Command};
use obmc_tools::{commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return ExitCode::SUCCESS;
    }

    let name = args.command.name();
    let log_file = logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(log_file);

    let result = match &args.command {
        Command::Sysroot(opts) => commands::sysroot::run(opts, &log),
        Command::Server(opts) => commands::server::run(opts, &log),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
