//! Process host seam for marquee
//!
//! The launcher talks to external processes through the [`ProcessHost`]
//! trait: spawn an argv, get back an entry-keyed handle, and receive
//! [`HostEvent::Exited`] notifications asynchronously over a channel.
//! [`LocalHost`] is the real OS-process implementation; [`MockHost`] is
//! for tests.

#[cfg(unix)]
mod local;
mod mock;
#[cfg(unix)]
mod process;

#[cfg(unix)]
pub use local::*;
pub use mock::*;

use async_trait::async_trait;
use marquee_util::EntryId;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from host operations
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Stop failed: {0}")]
    StopFailed(String),

    #[error("Process not found")]
    ProcessNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// How an external process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl ExitStatus {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn signaled(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    pub fn success() -> Self {
        Self::with_code(0)
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Opaque per-host process reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePayload {
    Local { pid: u32, pgid: u32 },
    Mock { id: u64 },
}

/// Handle to a spawned process, keyed by the entry that launched it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHandle {
    pub entry_id: EntryId,
    payload: HandlePayload,
}

impl HostHandle {
    pub fn new(entry_id: EntryId, payload: HandlePayload) -> Self {
        Self { entry_id, payload }
    }

    pub fn payload(&self) -> &HandlePayload {
        &self.payload
    }
}

/// Events from the host
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Process has exited, for any reason and with any status
    Exited {
        entry_id: EntryId,
        status: ExitStatus,
    },
}

/// Host trait - spawns and supervises external processes
#[async_trait]
pub trait ProcessHost: Send + Sync {
    /// Spawn a process; `argv[0]` is the program, the rest its arguments
    async fn spawn(&self, entry_id: EntryId, argv: &[String]) -> HostResult<HostHandle>;

    /// Forcibly terminate a process and wait up to `wait` for it to exit
    async fn stop(&self, handle: &HostHandle, wait: Duration) -> HostResult<()>;

    /// Subscribe to host events; may only be called once
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent>;
}
