//! Launch session manager

use marquee_catalog::Catalog;
use marquee_host::{ExitStatus, ProcessHost};
use marquee_util::{EntryId, MarqueeError, Result, SessionId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{CoreEvent, SessionRegistry};

/// Bounded wait for process-start confirmation
pub const START_TIMEOUT: Duration = Duration::from_secs(3);

/// Bounded wait per process during shutdown teardown
pub const SHUTDOWN_WAIT: Duration = Duration::from_secs(3);

/// Owns the one-process-per-entry invariant: starts processes, reacts to
/// their exits, and tears everything down at shutdown.
pub struct LaunchEngine {
    catalog: Arc<Catalog>,
    host: Arc<dyn ProcessHost>,
    registry: SessionRegistry,
}

impl LaunchEngine {
    pub fn new(catalog: Arc<Catalog>, host: Arc<dyn ProcessHost>) -> Self {
        Self {
            catalog,
            host,
            registry: SessionRegistry::new(),
        }
    }

    pub fn is_running(&self, entry_id: &EntryId) -> bool {
        self.registry
            .get(entry_id)
            .is_some_and(|s| s.is_running())
    }

    /// Launch the entry's process.
    ///
    /// Fails only for unknown entries; every per-launch condition
    /// (already running, start failure, start timeout) is reported as a
    /// [`CoreEvent`] so the UI surfaces it without aborting the app.
    pub async fn launch(&mut self, entry_id: &EntryId) -> Result<CoreEvent> {
        let entry = self
            .catalog
            .by_id(entry_id)
            .ok_or_else(|| MarqueeError::EntryNotFound(entry_id.clone()))?;

        let session = self.registry.get_or_create(entry_id);
        if session.is_running() {
            info!(entry_id = %entry_id, "Launch rejected, already running");
            return Ok(CoreEvent::AlreadyRunning {
                entry_id: entry_id.clone(),
            });
        }

        let argv = split_command(&entry.command);
        if argv.is_empty() {
            return Ok(CoreEvent::StartFailed {
                entry_id: entry_id.clone(),
                message: "Empty command".into(),
            });
        }

        let launch = SessionId::new();
        session.mark_starting(launch.clone());
        info!(entry_id = %entry_id, launch = %launch, program = %argv[0], "Starting process");

        let spawned = timeout(START_TIMEOUT, self.host.spawn(entry_id.clone(), &argv)).await;

        let session = self.registry.get_or_create(entry_id);
        match spawned {
            Ok(Ok(handle)) => {
                session.mark_running(handle);
                Ok(CoreEvent::Started {
                    entry_id: entry_id.clone(),
                })
            }
            Ok(Err(e)) => {
                session.mark_no_process();
                warn!(entry_id = %entry_id, error = %e, "Process start failed");
                Ok(CoreEvent::StartFailed {
                    entry_id: entry_id.clone(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                session.mark_no_process();
                warn!(entry_id = %entry_id, "Process start confirmation timed out");
                Ok(CoreEvent::StartFailed {
                    entry_id: entry_id.clone(),
                    message: format!(
                        "No start confirmation within {} seconds",
                        START_TIMEOUT.as_secs()
                    ),
                })
            }
        }
    }

    /// Handle an asynchronous process-exit notification.
    ///
    /// The entry is re-resolved by key at delivery time; stale or unknown
    /// notifications reset state harmlessly. Any exit status takes the
    /// same path.
    pub fn handle_exit(&mut self, entry_id: &EntryId, status: ExitStatus) -> CoreEvent {
        info!(entry_id = %entry_id, status = ?status, "Process exited");

        if let Some(session) = self.registry.get_mut(entry_id) {
            session.mark_no_process();
        }

        CoreEvent::Exited {
            entry_id: entry_id.clone(),
            status,
        }
    }

    /// Forcibly terminate every running process, waiting up to
    /// [`SHUTDOWN_WAIT`] for each before proceeding with teardown.
    pub async fn shutdown(&mut self) {
        let handles = self.registry.running_handles();
        if !handles.is_empty() {
            info!(count = handles.len(), "Stopping running processes");
        }

        for handle in handles {
            if let Err(e) = self.host.stop(&handle, SHUTDOWN_WAIT).await {
                warn!(entry_id = %handle.entry_id, error = %e, "Failed to stop process");
            }
            if let Some(session) = self.registry.get_mut(&handle.entry_id) {
                session.mark_no_process();
            }
        }
    }
}

/// Split a command string on spaces: first token is the program, the rest
/// are its arguments. No shell-quoting support; quoted arguments containing
/// spaces are split apart. Runs of spaces yield no empty tokens.
pub fn split_command(command: &str) -> Vec<String> {
    command
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
