//! Single-process launcher with timeout, cancellation, and merged output
//! capture.
//!
//! Runs exactly one external process to completion (or until the deadline or
//! the caller's cancel token fires) and returns its combined stdout/stderr.
//! Two launch modes:
//!
//! - **Direct** (`shell` empty): the resolved command text is word-split
//!   with shell-like quoting rules and exec'd as an argument vector.
//! - **Interpreter** (`shell` non-empty): the interpreter is spawned and the
//!   command text, plus a trailing newline, is written to its stdin.
//!
//! stdout and stderr share one anonymous pipe, so combined output preserves
//! the order the OS delivered it in. The child owns its own process group;
//! nothing it spawned survives this call.

use crate::engine::cancel::CancelToken;
use crate::engine::charset::Transcoder;
use crate::engine::process::GroupChild;
use crate::engine::sequencer::ExecContext;
use crate::engine::template;
use crate::error::TrayrunError;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// The fully resolved, launch-ready form of one command line. Borrows from
/// the descriptor; lives for exactly one call.
#[derive(Debug, Clone, Copy)]
pub struct Program<'a> {
    /// Interpreter path; empty selects direct mode.
    pub shell: &'a str,
    /// Command text, before variable resolution.
    pub command: &'a str,
    /// Working directory; empty inherits.
    pub dir: &'a str,
    /// Encoding label; empty disables transcoding.
    pub charset: &'a str,
    /// Per-launch deadline in seconds; zero disables.
    pub timeout_seconds: u64,
}

/// A failed step, pairing the error with whatever combined output the
/// process produced before failing. Pre-spawn failures carry empty output.
#[derive(Debug)]
pub struct StepFailure {
    pub output: String,
    pub error: TrayrunError,
}

impl StepFailure {
    fn bare(error: TrayrunError) -> Self {
        StepFailure {
            output: String::new(),
            error,
        }
    }
}

enum WaitOutcome {
    Exited(std::process::ExitStatus),
    TimedOut,
    Canceled,
}

/// Run one program to completion and return its combined output.
///
/// A non-zero exit is an error, but its output is still captured and
/// attached to the failure, matching the behavior users expect from a
/// command that prints its own diagnostics before exiting.
pub fn exec_program(
    program: &Program<'_>,
    ctx: &ExecContext,
) -> std::result::Result<String, StepFailure> {
    // Charset resolution happens first: a bad label must never spawn.
    let transcoder = Transcoder::for_label(program.charset).map_err(StepFailure::bare)?;
    let command_text = template::resolve(program.command, &ctx.args);

    let mut cmd;
    let display_name;
    let mut stdin_payload: Option<Vec<u8>> = None;

    if program.shell.is_empty() {
        // Direct mode: split into an argument vector.
        let words = shell_words::split(&command_text).map_err(|e| {
            StepFailure::bare(TrayrunError::CommandError(format!(
                "failed to parse command '{}': {}",
                command_text, e
            )))
        })?;

        if words.is_empty() || (words.len() == 1 && words[0].is_empty()) {
            return Err(StepFailure::bare(TrayrunError::EmptyCommand));
        }

        display_name = words[0].clone();

        match &transcoder {
            Some(t) => {
                // The target process expects its argv in the legacy
                // encoding; encode every element.
                let mut argv = Vec::with_capacity(words.len());
                for word in &words {
                    argv.push(native_arg(t.encode(word).map_err(StepFailure::bare)?));
                }
                cmd = Command::new(&argv[0]);
                cmd.args(&argv[1..]);
            }
            None => {
                cmd = Command::new(&words[0]);
                cmd.args(&words[1..]);
            }
        }
        cmd.stdin(Stdio::null());
    } else {
        // Interpreter mode: feed the command text on stdin.
        display_name = program.shell.to_string();

        let mut payload = match &transcoder {
            Some(t) => {
                cmd = Command::new(native_arg(
                    t.encode(program.shell).map_err(StepFailure::bare)?,
                ));
                t.encode(&command_text).map_err(StepFailure::bare)?
            }
            None => {
                cmd = Command::new(program.shell);
                command_text.clone().into_bytes()
            }
        };
        payload.push(b'\n');
        stdin_payload = Some(payload);
        cmd.stdin(Stdio::piped());
    }

    if !program.dir.is_empty() {
        cmd.current_dir(program.dir);
    }
    // Environment: full host environment, inherited by default.

    // One pipe shared by stdout and stderr keeps the OS interleaving.
    let (reader, writer) = io::pipe().map_err(|e| {
        StepFailure::bare(TrayrunError::CommandError(format!(
            "failed to create output pipe: {}",
            e
        )))
    })?;
    let writer_err = writer.try_clone().map_err(|e| {
        StepFailure::bare(TrayrunError::CommandError(format!(
            "failed to clone output pipe: {}",
            e
        )))
    })?;
    cmd.stdout(writer);
    cmd.stderr(writer_err);

    let mut child = GroupChild::spawn(cmd).map_err(|e| {
        StepFailure::bare(TrayrunError::CommandError(format!(
            "failed to execute '{}': {}",
            display_name, e
        )))
    })?;

    // Write the script off-thread so a child that never reads cannot wedge
    // the wait loop.
    if let Some(payload) = stdin_payload
        && let Some(mut stdin) = child.take_stdin()
    {
        std::thread::spawn(move || {
            let _ = stdin.write_all(&payload);
        });
    }

    let collector = std::thread::spawn(move || {
        let mut reader = reader;
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    });

    let waited = wait_with_deadline(&mut child, &ctx.cancel, program.timeout_seconds);
    // The child (and its group) is gone by now, so its pipe ends are closed
    // and the collector sees EOF.
    let raw = collector.join().unwrap_or_default();

    let waited = match waited {
        Ok(w) => w,
        Err(e) => {
            return Err(StepFailure::bare(TrayrunError::CommandError(format!(
                "failed to wait for '{}': {}",
                display_name, e
            ))));
        }
    };

    let output = match &transcoder {
        Some(t) if !raw.is_empty() => t.decode(&raw).map_err(StepFailure::bare)?,
        Some(_) => String::new(),
        None => String::from_utf8_lossy(&raw).into_owned(),
    };

    match waited {
        WaitOutcome::Exited(status) if status.success() => Ok(output),
        WaitOutcome::Exited(status) => Err(StepFailure {
            output,
            error: TrayrunError::CommandError(exit_message(status)),
        }),
        WaitOutcome::TimedOut => Err(StepFailure {
            output,
            error: TrayrunError::CommandError(format!(
                "timed out after {}s",
                program.timeout_seconds
            )),
        }),
        WaitOutcome::Canceled => Err(StepFailure {
            output,
            error: TrayrunError::CommandError("canceled".to_string()),
        }),
    }
}

/// Poll the child against the cancel token and, when configured, a deadline
/// measured from launch. Either firing kills the whole process group before
/// this returns; no process is left running.
fn wait_with_deadline(
    child: &mut GroupChild,
    cancel: &CancelToken,
    timeout_seconds: u64,
) -> io::Result<WaitOutcome> {
    let deadline =
        (timeout_seconds > 0).then(|| Instant::now() + Duration::from_secs(timeout_seconds));
    let poll_interval = Duration::from_millis(25);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(WaitOutcome::Exited(status)),
            Ok(None) => {
                if cancel.is_canceled() {
                    child.kill_group();
                    return Ok(WaitOutcome::Canceled);
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    child.kill_group();
                    return Ok(WaitOutcome::TimedOut);
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                child.kill_group();
                return Err(e);
            }
        }
    }
}

/// Human-readable message for a non-success exit status.
fn exit_message(status: std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => {
            #[cfg(unix)]
            {
                use std::os::unix::process::ExitStatusExt;
                if let Some(signal) = status.signal() {
                    return format!("terminated by signal {}", signal);
                }
            }
            "terminated abnormally".to_string()
        }
    }
}

/// Convert encoded argument bytes to the platform's native argument type.
#[cfg(unix)]
fn native_arg(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn native_arg(bytes: Vec<u8>) -> OsString {
    // Windows argv is UTF-16; legacy-encoded bytes cannot be passed through
    // exactly, so fall back to a lossy UTF-8 view of them.
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}
