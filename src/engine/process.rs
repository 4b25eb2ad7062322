//! Owned process-group handle.
//!
//! Children run in their own process group so that cancellation can
//! terminate the whole tree, not just the immediate process. The platform
//! details live here; the launcher and sequencer stay platform-neutral.

use std::io;
use std::process::{Child, ChildStdin, Command, ExitStatus};

/// A spawned child that owns its entire process group.
pub struct GroupChild {
    child: Child,
}

impl GroupChild {
    /// Configure `command` for group ownership and spawn it.
    ///
    /// Takes the command by value so its stdio handles (including the write
    /// ends of any shared output pipe) are dropped on return; the parent
    /// would otherwise keep the pipe open and never observe EOF.
    pub fn spawn(mut command: Command) -> io::Result<GroupChild> {
        configure_group(&mut command);
        let child = command.spawn()?;
        Ok(GroupChild { child })
    }

    /// Take the child's stdin handle, if piped.
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Non-blocking exit check; reaps the child when it has exited.
    pub fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Terminate the entire process group and reap the leader.
    ///
    /// Best-effort: the group may already be gone, and that is fine.
    pub fn kill_group(&mut self) {
        kill_group_impl(&mut self.child);
        let _ = self.child.wait();
    }

    /// True when the group leader can no longer be signaled (Unix only in
    /// tests; used to verify nothing survives cancellation).
    #[cfg(unix)]
    pub fn group_alive(&self) -> bool {
        // Signal 0 probes for existence without delivering anything.
        unsafe { libc::killpg(self.child.id() as libc::pid_t, 0) == 0 }
    }
}

#[cfg(unix)]
fn configure_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    unsafe {
        command.pre_exec(|| {
            if libc::setpgid(0, 0) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(unix)]
fn kill_group_impl(child: &mut Child) {
    let killed = unsafe { libc::killpg(child.id() as libc::pid_t, libc::SIGKILL) == 0 };
    if !killed {
        // Group signal failed (e.g. exec never happened); fall back to the
        // direct child.
        let _ = child.kill();
    }
}

#[cfg(windows)]
fn configure_group(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    // No attached console for tray/background use, and a fresh group so
    // console control events do not leak back to us.
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(windows)]
fn kill_group_impl(child: &mut Child) {
    let _ = child.kill();
}

#[cfg(not(any(unix, windows)))]
fn configure_group(_command: &mut Command) {}

#[cfg(not(any(unix, windows)))]
fn kill_group_impl(child: &mut Child) {
    let _ = child.kill();
}
