//! Periodic status polling
//!
//! One tick issues two independent requests: the download status check
//! (only while something is downloading) and the user session check. Each
//! request is numbered so the dashboard can drop a response that arrives
//! after a newer one.

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::DashboardApi;
use crate::shared::{SharedAppState, UserStatus, WorkerEvent};

/// Repeating poll loop
pub struct Poller {
    api: Arc<dyn DashboardApi>,
    shared: Arc<RwLock<SharedAppState>>,
    events: Sender<WorkerEvent>,
    interval: Duration,
    status_seq: u64,
    user_seq: u64,
}

impl Poller {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        shared: Arc<RwLock<SharedAppState>>,
        events: Sender<WorkerEvent>,
    ) -> Self {
        let interval = shared.read().config.polling.interval();
        Self {
            api,
            shared,
            events,
            interval,
            status_seq: 0,
            user_seq: 0,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until cancelled. The first tick fires after one full interval.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!("Polling every {:?}", self.interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
            self.tick();
        }
        info!("Polling stopped");
    }

    /// Issue this tick's requests without waiting for them
    pub fn tick(&mut self) -> Vec<JoinHandle<()>> {
        let active = self.shared.read().downloads.snapshot();
        debug!("Query active downloads: {:?}", active);

        let mut handles = Vec::with_capacity(2);

        if !active.is_empty() {
            self.status_seq += 1;
            let seq = self.status_seq;
            let api = self.api.clone();
            let events = self.events.clone();
            handles.push(tokio::spawn(async move {
                let _ = events.send(check_downloads(api.as_ref(), &active, seq).await);
            }));
        }

        self.user_seq += 1;
        let seq = self.user_seq;
        let api = self.api.clone();
        let events = self.events.clone();
        handles.push(tokio::spawn(async move {
            let _ = events.send(check_user(api.as_ref(), seq).await);
        }));

        handles
    }
}

/// Ask the server for progress of the given games
pub async fn check_downloads(api: &dyn DashboardApi, games: &[String], seq: u64) -> WorkerEvent {
    match api.download_status(games).await {
        Ok(games) => WorkerEvent::StatusPolled {
            seq,
            games: games.into_iter().collect::<BTreeMap<_, _>>(),
        },
        Err(e) => {
            warn!("Status poll failed: {}", e);
            WorkerEvent::RequestFailed {
                action: "Poll download status".to_string(),
                reason: e.to_string(),
            }
        }
    }
}

/// Ask the server for the login session state
pub async fn check_user(api: &dyn DashboardApi, seq: u64) -> WorkerEvent {
    match api.user_status().await {
        Ok(reply) => WorkerEvent::UserStatusPolled {
            seq,
            status: UserStatus::from_wire(reply.user_status.as_deref()),
        },
        Err(e) => {
            warn!("User status poll failed: {}", e);
            WorkerEvent::RequestFailed {
                action: "Poll user status".to_string(),
                reason: e.to_string(),
            }
        }
    }
}
