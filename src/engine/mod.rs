//! Templated command execution engine.
//!
//! The pipeline for one shortcut invocation:
//!
//! sequencer -> (per step) template -> charset (outbound) -> launcher
//!           -> charset (inbound) -> accumulated output
//!
//! Everything here is value-based and free of shared mutable state; the
//! engine is safe to drive from any number of concurrent callers.

pub mod cancel;
pub mod charset;
pub mod launcher;
pub mod process;
pub mod sequencer;
pub mod template;

pub use cancel::{CancelToken, hook_interrupt};
pub use sequencer::{ExecContext, RunOutcome};
