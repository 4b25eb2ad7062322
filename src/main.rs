//! Trayrun: run user-defined shell commands with variable substitution.
//!
//! This is the main entry point for the `trayrun` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod notify;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(&cli.config, cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
