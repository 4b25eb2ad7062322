//! Shortcut descriptor structs and default implementations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration: a named set of shortcut descriptors plus the
/// arguments mapping used for `{{args.*}}` template resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutSet {
    /// Display title for the application (tray tooltip in the desktop build).
    pub name: String,

    /// Top-level arguments mapping, resolved by `{{args.<key>}}` placeholders.
    /// Keys are unique and case-sensitive.
    pub args: BTreeMap<String, String>,

    /// Shortcut descriptors keyed by id. Ids sort lexically for display.
    pub shortcuts: BTreeMap<String, Shortcut>,
}

/// One configured shortcut: an ordered list of command lines plus launch
/// settings. Immutable after load from the engine's perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Shortcut {
    /// Display label; not used for identity.
    pub name: String,

    /// Ordered command-line steps. Takes precedence over `command`.
    pub commands: Vec<String>,

    /// Single command line, used when `commands` is empty.
    pub command: String,

    /// Encoding label (WHATWG charset name, e.g. "gbk"). Empty disables
    /// transcoding.
    pub charset: String,

    /// Interpreter path. Empty means the command line is word-split and
    /// exec'd directly; non-empty means the interpreter is spawned and the
    /// command text is fed to its stdin.
    pub shell: String,

    /// Working directory override. Empty inherits the caller's directory.
    pub dir: String,

    /// Per-step timeout in seconds. Zero means no deadline beyond the
    /// caller's own cancellation.
    #[serde(alias = "timeout")]
    pub timeout_seconds: u64,
}

impl Shortcut {
    /// The effective ordered list of command-line steps: `commands` if
    /// non-empty, else a one-element list from `command`, else empty.
    ///
    /// A descriptor where both are empty is inert: zero steps, no error.
    pub fn effective_commands(&self) -> Vec<&str> {
        if !self.commands.is_empty() {
            self.commands.iter().map(String::as_str).collect()
        } else if !self.command.is_empty() {
            vec![self.command.as_str()]
        } else {
            Vec::new()
        }
    }

    /// Display label, falling back to the given id when `name` is empty.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        if self.name.is_empty() { id } else { &self.name }
    }
}
