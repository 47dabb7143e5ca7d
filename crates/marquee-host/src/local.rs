//! Local OS-process host

use async_trait::async_trait;
use marquee_util::EntryId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::process::ManagedProcess;
use crate::{HandlePayload, HostError, HostEvent, HostHandle, HostResult, ProcessHost};

/// How often the monitor polls for exited children
const MONITOR_INTERVAL: Duration = Duration::from_millis(100);

/// [`ProcessHost`] backed by real OS processes.
///
/// A background monitor task reaps exited children and publishes
/// [`HostEvent::Exited`]; call [`LocalHost::start_monitor`] once after
/// construction.
pub struct LocalHost {
    processes: Arc<Mutex<HashMap<u32, (EntryId, ManagedProcess)>>>,
    event_tx: mpsc::UnboundedSender<HostEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<HostEvent>>>,
}

impl LocalHost {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            processes: Arc::new(Mutex::new(HashMap::new())),
            event_tx: tx,
            event_rx: Mutex::new(Some(rx)),
        }
    }

    /// Start the background exit monitor
    pub fn start_monitor(&self) -> tokio::task::JoinHandle<()> {
        let processes = self.processes.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(MONITOR_INTERVAL).await;

                let mut exited = Vec::new();

                {
                    let mut procs = processes.lock().unwrap();
                    for (pid, (entry_id, proc)) in procs.iter_mut() {
                        match proc.try_wait() {
                            Ok(Some(status)) => {
                                exited.push((*pid, entry_id.clone(), status));
                            }
                            Ok(None) => {}
                            Err(e) => {
                                warn!(pid = pid, error = %e, "Error checking process status");
                            }
                        }
                    }

                    for (pid, _, _) in &exited {
                        procs.remove(pid);
                    }
                }

                for (pid, entry_id, status) in exited {
                    info!(pid = pid, entry_id = %entry_id, status = ?status, "Process exited");
                    let _ = event_tx.send(HostEvent::Exited { entry_id, status });
                }
            }
        })
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessHost for LocalHost {
    async fn spawn(&self, entry_id: EntryId, argv: &[String]) -> HostResult<HostHandle> {
        let proc = ManagedProcess::spawn(argv)?;
        let (pid, pgid) = (proc.pid, proc.pgid);

        self.processes
            .lock()
            .unwrap()
            .insert(pid, (entry_id.clone(), proc));

        info!(pid = pid, entry_id = %entry_id, "Spawned process");

        Ok(HostHandle::new(
            entry_id,
            HandlePayload::Local { pid, pgid },
        ))
    }

    async fn stop(&self, handle: &HostHandle, wait: Duration) -> HostResult<()> {
        let pid = match handle.payload() {
            HandlePayload::Local { pid, .. } => *pid,
            _ => return Err(HostError::ProcessNotFound),
        };

        {
            let procs = self.processes.lock().unwrap();
            let Some((_, proc)) = procs.get(&pid) else {
                // Already reaped
                return Ok(());
            };
            proc.kill()?;
        }

        // Bounded wait for the monitor to reap the child
        let start = std::time::Instant::now();
        loop {
            if !self.processes.lock().unwrap().contains_key(&pid) {
                return Ok(());
            }
            if start.elapsed() >= wait {
                warn!(pid = pid, "Process did not exit within the stop timeout");
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_and_receive_exit_event() {
        let host = LocalHost::new();
        let mut rx = host.subscribe();
        host.start_monitor();

        let entry_id = EntryId::new("true.desktop");
        host.spawn(entry_id.clone(), &["true".to_string()])
            .await
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for exit event")
            .unwrap();

        let HostEvent::Exited { entry_id: id, status } = event;
        assert_eq!(id, entry_id);
        assert!(status.is_success());
    }

    #[tokio::test]
    async fn spawn_failure_reported() {
        let host = LocalHost::new();
        let _rx = host.subscribe();

        let result = host
            .spawn(
                EntryId::new("bad.desktop"),
                &["/nonexistent/definitely-not-a-program".to_string()],
            )
            .await;

        assert!(matches!(result, Err(HostError::SpawnFailed(_))));
    }

    #[tokio::test]
    async fn stop_kills_running_process() {
        let host = LocalHost::new();
        let mut rx = host.subscribe();
        host.start_monitor();

        let handle = host
            .spawn(
                EntryId::new("sleep.desktop"),
                &["sleep".to_string(), "60".to_string()],
            )
            .await
            .unwrap();

        host.stop(&handle, Duration::from_secs(3)).await.unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for exit event")
            .unwrap();

        let HostEvent::Exited { status, .. } = event;
        assert!(!status.is_success());
    }
}
