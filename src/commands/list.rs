//! The `list` command: print configured shortcuts.

use crate::config::ShortcutSet;
use crate::error::Result;

pub fn cmd_list(set: ShortcutSet) -> Result<()> {
    if set.shortcuts.is_empty() {
        println!("No shortcuts configured.");
        return Ok(());
    }

    if !set.name.is_empty() {
        println!("{}", set.name);
        println!();
    }

    // BTreeMap iteration is already id-sorted.
    for (id, shortcut) in &set.shortcuts {
        let steps = shortcut.effective_commands().len();
        println!(
            "  {:<20} {} ({} step{})",
            id,
            shortcut.display_name(id),
            steps,
            if steps == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
