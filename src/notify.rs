//! Notification values and message normalization.
//!
//! The engine hands run results to a [`Notifier`] verbatim; the notifier
//! decides presentation. Desktop toast delivery belongs to the host shell
//! and is not implemented here; the console notifier stands in for it and
//! applies the same whitespace normalization a toast body needs.

use std::sync::LazyLock;

use regex::Regex;

/// One user-facing notification: a title (the shortcut's display name) and
/// a message (the run's output, or its error text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
        }
    }
}

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());
static INDENTED_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n +").unwrap());

/// Squash runs of spaces and strip indentation after newlines so multi-line
/// process output fits a small notification body.
pub fn normalize_message(message: &str) -> String {
    let squashed = SPACE_RUNS.replace_all(message, " ");
    INDENTED_LINES.replace_all(&squashed, "\n").into_owned()
}

/// Delivery seam for notifications. Implementations must be shareable
/// across the dispatcher thread and its callers.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Prints notifications to stdout. Used by the CLI in place of a desktop
/// toast service.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let body = normalize_message(&notification.message);
        if body.is_empty() {
            println!("[{}] (no output)", notification.title);
        } else {
            println!("[{}] {}", notification.title, body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_squashes_space_runs() {
        assert_eq!(normalize_message("a    b  c"), "a b c");
    }

    #[test]
    fn normalize_strips_indentation_after_newlines() {
        assert_eq!(normalize_message("line1\n    line2"), "line1\nline2");
    }

    #[test]
    fn normalize_keeps_single_spaces_and_newlines() {
        assert_eq!(normalize_message("a b\nc d"), "a b\nc d");
    }

    #[test]
    fn normalize_handles_empty_message() {
        assert_eq!(normalize_message(""), "");
    }

    #[test]
    fn normalize_combined_case() {
        let input = "NAME   STATUS\n   web    up\n   db     up";
        assert_eq!(normalize_message(input), "NAME STATUS\nweb up\ndb up");
    }

    #[test]
    fn notification_new_accepts_strs_and_strings() {
        let n = Notification::new("title", String::from("message"));
        assert_eq!(n.title, "title");
        assert_eq!(n.message, "message");
    }
}
