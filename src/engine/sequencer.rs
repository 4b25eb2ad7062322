//! Sequential execution of a shortcut's command list.
//!
//! Runs the descriptor's steps strictly in order, stopping at the first
//! failure while keeping the output earlier steps already produced. Callers
//! get both the failing step's error and the partial output in one value.

use crate::config::Shortcut;
use crate::engine::cancel::CancelToken;
use crate::engine::launcher::{self, Program};
use crate::error::TrayrunError;
use std::collections::BTreeMap;

/// Per-invocation execution context: a cancellation signal plus the
/// arguments mapping for `{{args.*}}` resolution.
///
/// The engine holds no shared mutable state, so contexts can be built and
/// used from any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct ExecContext {
    pub cancel: CancelToken,
    pub args: BTreeMap<String, String>,
}

impl ExecContext {
    pub fn new(args: BTreeMap<String, String>) -> Self {
        ExecContext {
            cancel: CancelToken::new(),
            args,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Result of running one shortcut: accumulated output joined by newlines,
/// plus the first failing step's error when one occurred.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub error: Option<TrayrunError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run every step of `shortcut` in order, stopping at the first failure.
///
/// Non-empty step outputs are concatenated with a newline. A descriptor with
/// no effective steps is inert: empty output, no error. A failing step still
/// contributes whatever output it produced before failing; later steps never
/// run.
pub fn run(shortcut: &Shortcut, ctx: &ExecContext) -> RunOutcome {
    let mut outputs: Vec<String> = Vec::new();
    let mut error = None;

    for step in shortcut.effective_commands() {
        let program = Program {
            shell: &shortcut.shell,
            command: step,
            dir: &shortcut.dir,
            charset: &shortcut.charset,
            timeout_seconds: shortcut.timeout_seconds,
        };

        match launcher::exec_program(&program, ctx) {
            Ok(output) => {
                if !output.is_empty() {
                    outputs.push(output);
                }
            }
            Err(failure) => {
                if !failure.output.is_empty() {
                    outputs.push(failure.output);
                }
                error = Some(failure.error);
                break;
            }
        }
    }

    RunOutcome {
        output: outputs.join("\n"),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut_with_commands(commands: &[&str]) -> Shortcut {
        Shortcut {
            commands: commands.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn ctx() -> ExecContext {
        ExecContext::default()
    }

    #[test]
    fn empty_descriptor_yields_empty_output_no_error() {
        let outcome = run(&Shortcut::default(), &ctx());
        assert!(outcome.is_success());
        assert!(outcome.output.is_empty());
    }

    #[test]
    fn single_command_field_is_used_when_list_is_empty() {
        #[cfg(windows)]
        let shortcut = Shortcut {
            command: "cmd /c echo solo".to_string(),
            ..Default::default()
        };
        #[cfg(not(windows))]
        let shortcut = Shortcut {
            command: "echo solo".to_string(),
            ..Default::default()
        };

        let outcome = run(&shortcut, &ctx());
        assert!(outcome.is_success());
        assert_eq!(outcome.output.trim(), "solo");
    }

    #[cfg(unix)]
    #[test]
    fn outputs_are_joined_with_newlines_in_order() {
        let shortcut = shortcut_with_commands(&["echo first", "echo second", "echo third"]);
        let outcome = run(&shortcut, &ctx());
        assert!(outcome.is_success());
        assert_eq!(outcome.output, "first\n\nsecond\n\nthird\n");
    }

    #[cfg(unix)]
    #[test]
    fn empty_step_outputs_are_skipped_in_join() {
        let shortcut = shortcut_with_commands(&["echo a", "true", "echo b"]);
        let outcome = run(&shortcut, &ctx());
        assert!(outcome.is_success());
        assert_eq!(outcome.output, "a\n\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn failure_stops_the_sequence_and_keeps_prior_output() {
        let mut shortcut = shortcut_with_commands(&[
            "echo step-a",
            "exit 7",
            "echo step-c",
        ]);
        shortcut.shell = "/bin/sh".to_string();

        let outcome = run(&shortcut, &ctx());
        assert!(!outcome.is_success());
        assert!(outcome.output.contains("step-a"));
        assert!(!outcome.output.contains("step-c"));
        assert_eq!(outcome.error.unwrap().to_string(), "exit status 7");
    }

    #[cfg(unix)]
    #[test]
    fn failing_step_contributes_its_own_partial_output() {
        let mut shortcut =
            shortcut_with_commands(&["echo step-a", "echo step-b-partial; exit 1"]);
        shortcut.shell = "/bin/sh".to_string();

        let outcome = run(&shortcut, &ctx());
        assert!(!outcome.is_success());
        assert!(outcome.output.contains("step-a"));
        assert!(outcome.output.contains("step-b-partial"));
    }

    #[test]
    fn first_step_spawn_failure_yields_empty_output() {
        let shortcut = shortcut_with_commands(&["trayrun_no_such_binary_xyz"]);
        let outcome = run(&shortcut, &ctx());
        assert!(!outcome.is_success());
        assert!(outcome.output.is_empty());
    }

    #[test]
    fn bad_charset_aborts_before_any_step_runs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let marker = temp_dir.path().join("ran");
        #[cfg(windows)]
        let touch = format!("cmd /c type nul > {}", marker.display());
        #[cfg(not(windows))]
        let touch = format!("touch {}", marker.display());

        let mut shortcut = shortcut_with_commands(&[&touch]);
        shortcut.charset = "x-no-such-charset".to_string();

        let outcome = run(&shortcut, &ctx());
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome.error,
            Some(TrayrunError::UnknownCharset(_))
        ));
        assert!(!marker.exists(), "step must not run with a bad charset");
    }

    #[cfg(unix)]
    #[test]
    fn args_flow_into_each_step() {
        let context = ExecContext::new(
            [("greeting".to_string(), "hi".to_string())].into(),
        );
        let shortcut = shortcut_with_commands(&["echo {{args.greeting}}-1", "echo {{args.greeting}}-2"]);
        let outcome = run(&shortcut, &context);
        assert!(outcome.is_success());
        assert!(outcome.output.contains("hi-1"));
        assert!(outcome.output.contains("hi-2"));
    }

    #[cfg(unix)]
    #[test]
    fn cancellation_stops_an_in_flight_sequence() {
        use std::time::{Duration, Instant};

        let mut shortcut = shortcut_with_commands(&["sleep 30", "echo never"]);
        shortcut.shell = "/bin/sh".to_string();

        let context = ctx();
        let token = context.cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(200));
            token.cancel();
        });

        let start = Instant::now();
        let outcome = run(&shortcut, &context);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!outcome.is_success());
        assert!(!outcome.output.contains("never"));
    }

    #[cfg(unix)]
    #[test]
    fn concurrent_invocations_do_not_interfere() {
        let mut handles = Vec::new();
        for i in 0..8 {
            handles.push(std::thread::spawn(move || {
                let shortcut = Shortcut {
                    command: format!("echo worker-{}", i),
                    ..Default::default()
                };
                let outcome = run(&shortcut, &ExecContext::default());
                assert!(outcome.is_success());
                assert_eq!(outcome.output.trim(), format!("worker-{}", i));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
