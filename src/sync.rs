//! Library sync orchestration.
//!
//! Sync is advisory: a failed pass is logged, reported as "nothing
//! changed", and never blocks the rest of the flow. After a download job
//! starts, a bounded polling task watches for new files; at most one watch
//! runs at a time.

use crate::remote::model::SyncOutcome;
use crate::remote::LibraryService;
use crate::surface::{StatusKind, StatusSink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// One advisory sync pass: drives the status line and swallows failures,
/// reporting them as "nothing changed".
async fn sync_once(client: &dyn LibraryService, status: &dyn StatusSink) -> SyncOutcome {
    status.status(StatusKind::Info, "Syncing library...");
    match client.sync().await {
        Ok(outcome) => {
            if outcome.changed() {
                status.status(
                    StatusKind::Success,
                    &format!("Synced: +{} / -{}", outcome.added, outcome.removed),
                );
            } else {
                status.status(StatusKind::Success, "Library up to date");
            }
            outcome
        }
        Err(err) => {
            warn!(?err, "library sync failed");
            SyncOutcome::default()
        }
    }
}

pub struct SyncOrchestrator {
    client: Arc<dyn LibraryService>,
    status: Arc<dyn StatusSink>,
    poll_interval: Duration,
    poll_max_attempts: u32,
    watch: Mutex<Option<JoinHandle<()>>>,
}

impl SyncOrchestrator {
    pub fn new(
        client: Arc<dyn LibraryService>,
        status: Arc<dyn StatusSink>,
        poll_interval: Duration,
        poll_max_attempts: u32,
    ) -> Self {
        Self {
            client,
            status,
            poll_interval,
            poll_max_attempts,
            watch: Mutex::new(None),
        }
    }

    /// Run one sync pass and surface the outcome on the status line.
    pub async fn sync_now(&self) -> SyncOutcome {
        sync_once(self.client.as_ref(), self.status.as_ref()).await
    }

    /// Start the post-download watch: sync every `poll_interval`, at most
    /// `poll_max_attempts` times, announcing whenever something changed.
    /// A previously running watch is cancelled first, so the attempt
    /// counter always starts from zero.
    pub fn start_download_watch(&self) {
        let mut watch = self.watch.lock().expect("watch lock poisoned");
        if let Some(handle) = watch.take() {
            handle.abort();
        }

        let client = Arc::clone(&self.client);
        let status = Arc::clone(&self.status);
        let interval = self.poll_interval;
        let attempts = self.poll_max_attempts;
        info!(
            attempts,
            interval_ms = interval.as_millis() as u64,
            "starting download watch"
        );
        *watch = Some(tokio::spawn(async move {
            for _ in 0..attempts {
                tokio::time::sleep(interval).await;
                let outcome = sync_once(client.as_ref(), status.as_ref()).await;
                if outcome.changed() {
                    status.status(StatusKind::Success, "New files detected!");
                }
            }
        }));
    }

    pub fn cancel_watch(&self) {
        if let Some(handle) = self.watch.lock().expect("watch lock poisoned").take() {
            handle.abort();
        }
    }

    /// Whether a watch task is still running (it self-terminates after its
    /// attempt cap).
    pub fn watch_active(&self) -> bool {
        self.watch
            .lock()
            .expect("watch lock poisoned")
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}
