//! Error types for the trayrun CLI.
//!
//! Uses thiserror for derive macros. Every step-level engine failure maps to
//! one variant here; the sequencer stops at the first failing step and returns
//! the variant alongside whatever partial output was already produced.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for trayrun operations.
#[derive(Error, Debug)]
pub enum TrayrunError {
    /// User provided invalid arguments or named an unknown shortcut.
    #[error("{0}")]
    UserError(String),

    /// Config file could not be found, read, parsed, or validated.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// The configured charset label is not a known encoding.
    /// Raised before any process is spawned.
    #[error("unknown charset '{0}'")]
    UnknownCharset(String),

    /// Direct-mode command text split into an empty argument vector.
    /// Raised before any process is spawned.
    #[error("empty command")]
    EmptyCommand,

    /// Resolved command text or an argument could not be represented
    /// in the configured charset.
    #[error("cannot encode command text as {0}")]
    CharsetEncode(String),

    /// Captured process output was not valid in the configured charset.
    #[error("cannot decode output as {0}")]
    OutputDecode(String),

    /// Process spawn/run failure, non-zero exit, timeout, or cancellation.
    #[error("{0}")]
    CommandError(String),
}

impl TrayrunError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TrayrunError::UserError(_) => exit_codes::USER_ERROR,
            TrayrunError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            TrayrunError::UnknownCharset(_)
            | TrayrunError::EmptyCommand
            | TrayrunError::CharsetEncode(_)
            | TrayrunError::OutputDecode(_)
            | TrayrunError::CommandError(_) => exit_codes::RUN_FAILURE,
        }
    }
}

/// Result type alias for trayrun operations.
pub type Result<T> = std::result::Result<T, TrayrunError>;
