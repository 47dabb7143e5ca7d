//! Managed child processes

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use tracing::debug;

use crate::{ExitStatus, HostError, HostResult};

/// Child process running in its own process group
pub struct ManagedProcess {
    pub child: Child,
    pub pid: u32,
    pub pgid: u32,
}

impl ManagedProcess {
    /// Spawn a new process in its own process group. The environment is
    /// inherited; stdio is detached.
    pub fn spawn(argv: &[String]) -> HostResult<Self> {
        if argv.is_empty() {
            return Err(HostError::SpawnFailed("Empty argv".into()));
        }

        let program = &argv[0];
        let args = &argv[1..];

        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        // The child becomes the leader of a new process group so force
        // termination reaches anything it forks
        // SAFETY: setsid is async-signal-safe, fine in the pre-exec context
        unsafe {
            cmd.pre_exec(|| {
                nix::unistd::setsid().map_err(std::io::Error::other)?;
                Ok(())
            });
        }

        let child = cmd
            .spawn()
            .map_err(|e| HostError::SpawnFailed(format!("Failed to start {}: {}", program, e)))?;

        let pid = child.id();
        let pgid = pid; // After setsid, pid == pgid

        debug!(pid = pid, program = %program, "Process spawned");

        Ok(Self { child, pid, pgid })
    }

    /// Send SIGKILL to the process group
    pub fn kill(&self) -> HostResult<()> {
        let pgid = Pid::from_raw(-(self.pgid as i32)); // Negative for process group

        match signal::kill(pgid, Signal::SIGKILL) {
            Ok(()) => {
                debug!(pgid = self.pgid, "Sent SIGKILL to process group");
                Ok(())
            }
            Err(nix::errno::Errno::ESRCH) => {
                // Process already gone
                Ok(())
            }
            Err(e) => Err(HostError::StopFailed(format!(
                "Failed to send SIGKILL: {}",
                e
            ))),
        }
    }

    /// Check if the process has exited (non-blocking)
    pub fn try_wait(&mut self) -> HostResult<Option<ExitStatus>> {
        match self.child.try_wait() {
            Ok(Some(status)) => Ok(Some(convert_status(status))),
            Ok(None) => Ok(None), // Still running
            Err(e) => Err(HostError::Internal(format!("Wait failed: {}", e))),
        }
    }

    /// Wait for the process to exit (blocking)
    pub fn wait(&mut self) -> HostResult<ExitStatus> {
        match self.child.wait() {
            Ok(status) => Ok(convert_status(status)),
            Err(e) => Err(HostError::Internal(format!("Wait failed: {}", e))),
        }
    }
}

fn convert_status(status: std::process::ExitStatus) -> ExitStatus {
    if let Some(code) = status.code() {
        ExitStatus::with_code(code)
    } else {
        use std::os::unix::process::ExitStatusExt;
        match status.signal() {
            Some(sig) => ExitStatus::signaled(sig),
            None => ExitStatus::with_code(-1),
        }
    }
}
