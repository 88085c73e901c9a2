//! Atmos: layered CLI configuration, stack resolution and workflow runner.
//!
//! This is the main entry point for the `atmos` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and maps
//! errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod paths;
pub mod stacks;
pub mod varfile;
pub mod workflow;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::env::{self, EnvVars};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Best guess until the config files are read; see `logging::set_verbose`.
    let verbose = cli.global.logs_verbose.unwrap_or_else(|| {
        EnvVars::from_process()
            .get_bool(env::LOGS_VERBOSE)
            .ok()
            .flatten()
            .unwrap_or(false)
    });
    logging::init(verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
