//! Command implementations for trayrun.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod list;
mod run;

use crate::cli::Command;
use crate::config::ShortcutSet;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(config_path: &str, command: Command) -> Result<()> {
    match command {
        Command::List => list::cmd_list(load(config_path)?),
        Command::Run(args) => run::cmd_run(load(config_path)?, args),
        Command::Check => check::cmd_check(load(config_path)?),
    }
}

fn load(config_path: &str) -> Result<ShortcutSet> {
    ShortcutSet::load(config_path)
}
