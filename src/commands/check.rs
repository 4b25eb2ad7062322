//! The `check` command: load and validate the config, report its shape.

use crate::config::ShortcutSet;
use crate::error::Result;

pub fn cmd_check(set: ShortcutSet) -> Result<()> {
    // Loading already parsed and validated; report what we found.
    println!(
        "Config OK: {} shortcut{}",
        set.shortcuts.len(),
        if set.shortcuts.len() == 1 { "" } else { "s" }
    );

    for (id, shortcut) in &set.shortcuts {
        if shortcut.effective_commands().is_empty() {
            println!("  note: '{}' has no commands and will produce no output", id);
        }
    }

    Ok(())
}
