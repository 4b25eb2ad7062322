//! Channel-based request dispatch.
//!
//! UI events (a menu click, a CLI invocation) are turned into
//! [`DispatchRequest`] values and sent over an mpsc channel to a single
//! dispatcher thread that owns the shortcut set as an explicit value. This
//! keeps event sources decoupled from execution and keeps configuration out
//! of global state.
//!
//! Each request runs through the sequencer; the resulting notification goes
//! to the configured [`Notifier`], and the full [`RunOutcome`] is sent back
//! on the request's optional reply channel for callers that need the exit
//! status (the CLI does, a fire-and-forget tray click does not).

use crate::config::ShortcutSet;
use crate::engine::{CancelToken, ExecContext, RunOutcome, sequencer};
use crate::error::{Result, TrayrunError};
use crate::notify::{Notification, Notifier};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// One unit of work for the dispatcher.
#[derive(Debug)]
pub struct DispatchRequest {
    /// Id of the shortcut to run.
    pub shortcut_id: String,

    /// Extra arguments overlaid on the set's top-level `args` mapping for
    /// this invocation only. Overlay wins on key collisions.
    pub args: BTreeMap<String, String>,

    /// Where to send the outcome, when the requester wants it back.
    pub reply: Option<mpsc::Sender<RunOutcome>>,
}

impl DispatchRequest {
    pub fn new(shortcut_id: impl Into<String>) -> Self {
        DispatchRequest {
            shortcut_id: shortcut_id.into(),
            args: BTreeMap::new(),
            reply: None,
        }
    }

    pub fn with_args(mut self, args: BTreeMap<String, String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_reply(mut self, reply: mpsc::Sender<RunOutcome>) -> Self {
        self.reply = Some(reply);
        self
    }
}

/// Handle to a running dispatcher thread.
pub struct Dispatcher {
    sender: mpsc::Sender<DispatchRequest>,
    handle: JoinHandle<()>,
}

impl Dispatcher {
    /// Start a dispatcher thread owning `set`. Requests sent through the
    /// handle run one at a time, in arrival order; the channel disconnecting
    /// shuts the thread down after draining queued requests.
    pub fn spawn(set: ShortcutSet, cancel: CancelToken, notifier: Arc<dyn Notifier>) -> Dispatcher {
        let (sender, receiver) = mpsc::channel::<DispatchRequest>();

        let handle = std::thread::spawn(move || {
            for request in receiver {
                dispatch_one(&set, &cancel, notifier.as_ref(), request);
            }
        });

        Dispatcher { sender, handle }
    }

    /// A cloneable sender for additional event sources.
    pub fn sender(&self) -> mpsc::Sender<DispatchRequest> {
        self.sender.clone()
    }

    /// Queue one request.
    pub fn send(&self, request: DispatchRequest) -> Result<()> {
        self.sender
            .send(request)
            .map_err(|_| TrayrunError::UserError("dispatcher has stopped".to_string()))
    }

    /// Close the channel and wait for queued requests to drain.
    pub fn join(self) {
        drop(self.sender);
        let _ = self.handle.join();
    }
}

fn dispatch_one(
    set: &ShortcutSet,
    cancel: &CancelToken,
    notifier: &dyn Notifier,
    request: DispatchRequest,
) {
    let Some(shortcut) = set.shortcuts.get(&request.shortcut_id) else {
        let error = TrayrunError::UserError(format!(
            "unknown shortcut '{}'",
            request.shortcut_id
        ));
        notifier.notify(&Notification::new(
            request.shortcut_id.clone(),
            error.to_string(),
        ));
        if let Some(reply) = request.reply {
            let _ = reply.send(RunOutcome {
                output: String::new(),
                error: Some(error),
            });
        }
        return;
    };

    // Per-invocation arguments overlay the configured mapping.
    let mut args = set.args.clone();
    args.extend(request.args);

    let ctx = ExecContext::new(args).with_cancel(cancel.clone());
    let outcome = sequencer::run(shortcut, &ctx);

    let title = shortcut.display_name(&request.shortcut_id);
    let message = match &outcome.error {
        // Failure: deliver the error text together with any partial output.
        Some(error) if outcome.output.is_empty() => error.to_string(),
        Some(error) => format!("{}\n{}", outcome.output, error),
        None => outcome.output.clone(),
    };
    notifier.notify(&Notification::new(title, message));

    if let Some(reply) = request.reply {
        let _ = reply.send(outcome);
    }
}
