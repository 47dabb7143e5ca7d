//! Per-entry launch session state machine

use marquee_host::HostHandle;
use marquee_util::{EntryId, SessionId};
use std::collections::HashMap;

/// State of an entry's session.
///
/// `NoProcess → Starting → Running → NoProcess` on exit, or
/// `Starting → NoProcess` on start failure. Launch attempts while
/// `Running` are rejected without touching the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoProcess,
    Starting,
    Running,
}

/// At most one concurrently-running external process per entry.
///
/// Created lazily on the first launch attempt; the process handle is
/// recreated on each launch but the session itself persists.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    handle: Option<HostHandle>,
    current_launch: Option<SessionId>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn handle(&self) -> Option<&HostHandle> {
        self.handle.as_ref()
    }

    /// Id of the launch currently starting or running
    pub fn current_launch(&self) -> Option<&SessionId> {
        self.current_launch.as_ref()
    }

    pub fn mark_starting(&mut self, launch: SessionId) {
        self.state = SessionState::Starting;
        self.handle = None;
        self.current_launch = Some(launch);
    }

    pub fn mark_running(&mut self, handle: HostHandle) {
        self.state = SessionState::Running;
        self.handle = Some(handle);
    }

    pub fn mark_no_process(&mut self) {
        self.state = SessionState::NoProcess;
        self.handle = None;
        self.current_launch = None;
    }
}

/// Entry-keyed session registry.
///
/// Sessions are owned here, independently of any tile widget; tiles refer
/// to entries by key only.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<EntryId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entry_id: &EntryId) -> Option<&Session> {
        self.sessions.get(entry_id)
    }

    /// Get or lazily create the session for an entry
    pub fn get_or_create(&mut self, entry_id: &EntryId) -> &mut Session {
        self.sessions.entry(entry_id.clone()).or_default()
    }

    pub fn get_mut(&mut self, entry_id: &EntryId) -> Option<&mut Session> {
        self.sessions.get_mut(entry_id)
    }

    /// Handles of every running session
    pub fn running_handles(&self) -> Vec<HostHandle> {
        self.sessions
            .values()
            .filter(|s| s.is_running())
            .filter_map(|s| s.handle().cloned())
            .collect()
    }
}
