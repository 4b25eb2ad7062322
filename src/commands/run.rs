//! The `run` command: execute one shortcut through the dispatcher.

use crate::cli::RunArgs;
use crate::config::ShortcutSet;
use crate::dispatch::{DispatchRequest, Dispatcher};
use crate::engine::{CancelToken, hook_interrupt};
use crate::error::{Result, TrayrunError};
use crate::notify::ConsoleNotifier;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;

pub fn cmd_run(set: ShortcutSet, args: RunArgs) -> Result<()> {
    let overlay = parse_arg_overrides(&args.args)?;

    // Ctrl-C cancels the in-flight process group instead of killing us
    // mid-cleanup.
    let cancel = CancelToken::new();
    hook_interrupt(&cancel);

    let dispatcher = Dispatcher::spawn(set, cancel, Arc::new(ConsoleNotifier));

    let (reply_tx, reply_rx) = mpsc::channel();
    dispatcher.send(
        DispatchRequest::new(args.shortcut_id)
            .with_args(overlay)
            .with_reply(reply_tx),
    )?;

    let outcome = reply_rx.recv().map_err(|_| {
        TrayrunError::UserError("dispatcher stopped before replying".to_string())
    })?;
    dispatcher.join();

    match outcome.error {
        None => Ok(()),
        Some(error) => Err(error),
    }
}

/// Parse repeated `--arg KEY=VALUE` flags into a mapping.
fn parse_arg_overrides(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut overlay = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(TrayrunError::UserError(format!(
                "invalid --arg '{}': expected KEY=VALUE",
                pair
            )));
        };
        if key.is_empty() {
            return Err(TrayrunError::UserError(format!(
                "invalid --arg '{}': key must be non-empty",
                pair
            )));
        }
        overlay.insert(key.to_string(), value.to_string());
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Shortcut;
    use crate::exit_codes;

    fn set_with(id: &str, shortcut: Shortcut) -> ShortcutSet {
        let mut set = ShortcutSet::default();
        set.shortcuts.insert(id.to_string(), shortcut);
        set
    }

    #[test]
    fn parse_arg_overrides_splits_on_first_equals() {
        let overlay =
            parse_arg_overrides(&["a=1".to_string(), "b=x=y".to_string()]).unwrap();
        assert_eq!(overlay["a"], "1");
        assert_eq!(overlay["b"], "x=y");
    }

    #[test]
    fn parse_arg_overrides_allows_empty_value() {
        let overlay = parse_arg_overrides(&["k=".to_string()]).unwrap();
        assert_eq!(overlay["k"], "");
    }

    #[test]
    fn parse_arg_overrides_rejects_missing_equals() {
        let result = parse_arg_overrides(&["nope".to_string()]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn parse_arg_overrides_rejects_empty_key() {
        assert!(parse_arg_overrides(&["=v".to_string()]).is_err());
    }

    #[test]
    fn cmd_run_unknown_shortcut_is_user_error() {
        let result = cmd_run(
            ShortcutSet::default(),
            RunArgs {
                shortcut_id: "ghost".to_string(),
                args: vec![],
            },
        );
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn cmd_run_success() {
        #[cfg(windows)]
        let shortcut = Shortcut {
            command: "cmd /c echo ok".to_string(),
            ..Default::default()
        };
        #[cfg(not(windows))]
        let shortcut = Shortcut {
            command: "echo ok".to_string(),
            ..Default::default()
        };

        let result = cmd_run(
            set_with("ok", shortcut),
            RunArgs {
                shortcut_id: "ok".to_string(),
                args: vec![],
            },
        );
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn cmd_run_failure_surfaces_step_error() {
        let shortcut = Shortcut {
            command: "sh -c 'exit 5'".to_string(),
            ..Default::default()
        };

        let result = cmd_run(
            set_with("fails", shortcut),
            RunArgs {
                shortcut_id: "fails".to_string(),
                args: vec![],
            },
        );
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::RUN_FAILURE);
        assert_eq!(err.to_string(), "exit status 5");
    }
}
