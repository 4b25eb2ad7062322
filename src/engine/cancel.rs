//! Cooperative cancellation for in-flight commands.
//!
//! A [`CancelToken`] is a cloneable flag shared between the caller and the
//! launcher's wait loop. Cancelling it terminates the active child's whole
//! process group; a per-step timeout is layered on top of it inside the
//! launcher, either one firing kills the process.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation flag. All clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent; visible to all clones.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

#[cfg(unix)]
mod interrupt {
    use super::CancelToken;
    use std::sync::OnceLock;

    static INTERRUPT_TOKEN: OnceLock<CancelToken> = OnceLock::new();

    extern "C" fn handle_interrupt(_signal: libc::c_int) {
        // Only the atomic store is permitted here; OnceLock::get is a plain
        // load once the cell is initialized.
        if let Some(token) = INTERRUPT_TOKEN.get() {
            token.cancel();
        }
    }

    /// Cancel `token` when the process receives SIGINT (Ctrl-C).
    ///
    /// Only the first registered token is hooked; later calls are ignored.
    pub fn hook_interrupt(token: &CancelToken) {
        if INTERRUPT_TOKEN.set(token.clone()).is_ok() {
            unsafe {
                libc::signal(libc::SIGINT, handle_interrupt as libc::sighandler_t);
            }
        }
    }
}

#[cfg(unix)]
pub use interrupt::hook_interrupt;

/// Ctrl-C hooking is a no-op on non-Unix targets; callers can still cancel
/// the token explicitly.
#[cfg(not(unix))]
pub fn hook_interrupt(_token: &CancelToken) {}
