//! Events driving the UI's launch-state transitions

use marquee_host::ExitStatus;
use marquee_util::EntryId;

/// Outcome of a launch attempt or an asynchronous process-lifecycle
/// notification. Entries are referred to by key; the receiver re-resolves
/// them at delivery time.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// Process confirmed started; tile shows "Running..", window minimizes
    Started { entry_id: EntryId },

    /// Launch rejected because a process is already running. Informational,
    /// not an error; process state is untouched.
    AlreadyRunning { entry_id: EntryId },

    /// Process failed to start; session back to no-process so a retry is
    /// possible
    StartFailed { entry_id: EntryId, message: String },

    /// Process exited, with any status; tile resets and the window returns
    Exited {
        entry_id: EntryId,
        status: ExitStatus,
    },
}

impl CoreEvent {
    pub fn entry_id(&self) -> &EntryId {
        match self {
            CoreEvent::Started { entry_id }
            | CoreEvent::AlreadyRunning { entry_id }
            | CoreEvent::StartFailed { entry_id, .. }
            | CoreEvent::Exited { entry_id, .. } => entry_id,
        }
    }
}
