//! CLI argument parsing for trayrun.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the command structure; actual implementations are in the
//! `commands` module.

use clap::{Parser, Subcommand};

/// Trayrun: run user-defined shell commands with variable substitution.
///
/// Shortcuts are defined in a config file (JSON, YAML, or TOML) as ordered
/// command lists with optional interpreter, working directory, charset, and
/// timeout settings. `{{args.*}}` and `{{env.*}}` placeholders in command
/// text are resolved at run time.
#[derive(Parser, Debug)]
#[command(name = "trayrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file. When the file does not exist, sibling files
    /// with a known extension (.json/.yaml/.yml/.toml/.tml) are probed.
    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for trayrun.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured shortcuts.
    ///
    /// Prints shortcut ids and display names, sorted by id.
    List,

    /// Run one shortcut.
    ///
    /// Executes the shortcut's command sequence, printing the combined
    /// output. Ctrl-C cancels the in-flight process and its whole process
    /// group. Partial output is still printed when a step fails.
    Run(RunArgs),

    /// Load and validate the config file.
    ///
    /// Reports the shortcut count and flags inert shortcuts (no commands).
    Check,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Shortcut id to run.
    pub shortcut_id: String,

    /// Extra template argument as KEY=VALUE; repeatable. Overlays the
    /// config-level args mapping for this invocation.
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments from std::env::args.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
