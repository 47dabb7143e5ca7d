//! Mock host for testing

use async_trait::async_trait;
use marquee_util::EntryId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{
    ExitStatus, HandlePayload, HostError, HostEvent, HostHandle, HostResult, ProcessHost,
};

/// Mock host for unit/integration testing
pub struct MockHost {
    next_id: AtomicU64,
    running: Arc<Mutex<HashMap<u64, EntryId>>>,
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>,

    /// Configure spawn to fail
    pub fail_spawn: Arc<Mutex<bool>>,

    /// Configure spawn to hang (for start-timeout tests)
    pub hang_spawn: Arc<Mutex<bool>>,
}

impl MockHost {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            next_id: AtomicU64::new(1),
            running: Arc::new(Mutex::new(HashMap::new())),
            event_tx: tx,
            event_rx: Mutex::new(Some(rx)),
            fail_spawn: Arc::new(Mutex::new(false)),
            hang_spawn: Arc::new(Mutex::new(false)),
        }
    }

    /// Entries with a live mock process
    pub fn running_entries(&self) -> Vec<EntryId> {
        self.running.lock().unwrap().values().cloned().collect()
    }

    pub fn set_fail_spawn(&self, fail: bool) {
        *self.fail_spawn.lock().unwrap() = fail;
    }

    /// Simulate the process for `entry_id` exiting with `status`
    pub fn simulate_exit(&self, entry_id: &EntryId, status: ExitStatus) {
        let mut running = self.running.lock().unwrap();
        running.retain(|_, id| id != entry_id);
        let _ = self.event_tx.send(HostEvent::Exited {
            entry_id: entry_id.clone(),
            status,
        });
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessHost for MockHost {
    async fn spawn(&self, entry_id: EntryId, argv: &[String]) -> HostResult<HostHandle> {
        if argv.is_empty() {
            return Err(HostError::SpawnFailed("Empty argv".into()));
        }

        if *self.hang_spawn.lock().unwrap() {
            // Never resolves; exercised through timeouts
            std::future::pending::<()>().await;
        }

        if *self.fail_spawn.lock().unwrap() {
            return Err(HostError::SpawnFailed("Mock spawn failure".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.running.lock().unwrap().insert(id, entry_id.clone());

        Ok(HostHandle::new(entry_id, HandlePayload::Mock { id }))
    }

    async fn stop(&self, handle: &HostHandle, _wait: Duration) -> HostResult<()> {
        let id = match handle.payload() {
            HandlePayload::Mock { id } => *id,
            _ => return Err(HostError::ProcessNotFound),
        };

        if self.running.lock().unwrap().remove(&id).is_some() {
            let _ = self.event_tx.send(HostEvent::Exited {
                entry_id: handle.entry_id.clone(),
                status: ExitStatus::signaled(9),
            });
        }

        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }
}
