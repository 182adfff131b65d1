//! Network worker
//!
//! Runs every API request on the tokio runtime and reports the outcome to
//! the dashboard as a [`WorkerEvent`]. Nothing here touches UI state.

pub mod poller;

use crossbeam_channel::Sender;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::api::DashboardApi;
use crate::shared::{DashboardCommand, WorkerEvent};

pub use poller::Poller;

/// Executes user actions in the background
#[derive(Clone)]
pub struct Dispatcher {
    runtime: Handle,
    api: Arc<dyn DashboardApi>,
    events: Sender<WorkerEvent>,
}

impl Dispatcher {
    pub fn new(runtime: Handle, api: Arc<dyn DashboardApi>, events: Sender<WorkerEvent>) -> Self {
        Self { runtime, api, events }
    }

    /// Issue the request for a command without waiting for it
    pub fn dispatch(&self, command: DashboardCommand) {
        debug!("Dispatching {:?}", command);
        let api = self.api.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let event = execute(api.as_ref(), command).await;
            let _ = events.send(event);
        });
    }

    /// Fetch the authoritative active-downloads list
    pub fn bootstrap(&self) {
        let api = self.api.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let _ = events.send(bootstrap(api.as_ref()).await);
        });
    }
}

/// Perform one user action and describe its outcome
pub async fn execute(api: &dyn DashboardApi, command: DashboardCommand) -> WorkerEvent {
    let action = command.describe();
    let result = match command {
        DashboardCommand::TogglePlatform { game, platform } => api
            .toggle_platform(&game, platform)
            .await
            .map(|status| WorkerEvent::PlatformToggled { game, platform, missing: status.missing }),
        DashboardCommand::ToggleDefaultPlatform { platform } => api
            .toggle_default_platform(platform)
            .await
            .map(|games| WorkerEvent::DefaultPlatformToggled {
                platform,
                games: games
                    .into_iter()
                    .map(|(game, status)| (game, status.missing))
                    .collect::<BTreeMap<_, _>>(),
            }),
        DashboardCommand::StartDownload { game } => api
            .start_download(&game)
            .await
            .map(|()| WorkerEvent::DownloadStarted { game }),
        DashboardCommand::StopDownload { game } => api
            .stop_download(&game)
            .await
            .map(|()| WorkerEvent::DownloadStopped { game }),
    };

    match result {
        Ok(event) => {
            info!("{}: ok", action);
            event
        }
        Err(e) => {
            warn!("{} failed: {}", action, e);
            WorkerEvent::RequestFailed { action, reason: e.to_string() }
        }
    }
}

/// Fetch the server's list of active downloads
pub async fn bootstrap(api: &dyn DashboardApi) -> WorkerEvent {
    match api.active_downloads().await {
        Ok(active) => {
            info!("Current active downloads: {:?}", active);
            WorkerEvent::Bootstrapped { active }
        }
        Err(e) => {
            warn!("Fetching active downloads failed: {}", e);
            WorkerEvent::RequestFailed {
                action: "Load active downloads".to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::{FileStatus, Platform};

    #[tokio::test]
    async fn test_toggle_platform_reports_missing() {
        let api = FakeApi::new();
        api.missing.lock().insert("witcher".to_string(), true);

        let event = execute(
            &api,
            DashboardCommand::TogglePlatform { game: "witcher".to_string(), platform: Platform::Linux },
        )
        .await;

        assert_eq!(
            event,
            WorkerEvent::PlatformToggled {
                game: "witcher".to_string(),
                platform: Platform::Linux,
                missing: true,
            }
        );
        assert_eq!(api.calls(), vec!["GET /platform/witcher/4"]);
    }

    #[tokio::test]
    async fn test_default_platform_lists_games() {
        let api = FakeApi::new();
        api.default_platform.lock().insert("a".to_string(), FileStatus { missing: true });
        api.default_platform.lock().insert("b".to_string(), FileStatus { missing: false });

        let event = execute(&api, DashboardCommand::ToggleDefaultPlatform { platform: Platform::Mac }).await;

        let WorkerEvent::DefaultPlatformToggled { platform, games } = event else {
            panic!("unexpected event {:?}", event);
        };
        assert_eq!(platform, Platform::Mac);
        assert_eq!(games.get("a"), Some(&true));
        assert_eq!(games.get("b"), Some(&false));
        assert_eq!(api.calls(), vec!["GET /default_platform/2"]);
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let api = FakeApi::new();

        let started = execute(&api, DashboardCommand::StartDownload { game: "g1".to_string() }).await;
        let stopped = execute(&api, DashboardCommand::StopDownload { game: "g1".to_string() }).await;

        assert_eq!(started, WorkerEvent::DownloadStarted { game: "g1".to_string() });
        assert_eq!(stopped, WorkerEvent::DownloadStopped { game: "g1".to_string() });
        assert_eq!(api.calls(), vec!["GET /download/g1", "GET /stop/g1"]);
    }

    #[tokio::test]
    async fn test_failure_becomes_notice() {
        let api = FakeApi::new();
        *api.fail_with.lock() = Some(503);

        let event = execute(&api, DashboardCommand::StartDownload { game: "g1".to_string() }).await;

        assert_eq!(
            event,
            WorkerEvent::RequestFailed {
                action: "Start download of g1".to_string(),
                reason: "503 Service Unavailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_bootstrap() {
        let api = FakeApi::new();
        *api.active.lock() = vec!["g1".to_string(), "g2".to_string()];

        assert_eq!(
            bootstrap(&api).await,
            WorkerEvent::Bootstrapped { active: vec!["g1".to_string(), "g2".to_string()] }
        );

        *api.fail_with.lock() = Some(500);
        assert!(matches!(bootstrap(&api).await, WorkerEvent::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_dispatcher_sends_event() {
        let api = Arc::new(FakeApi::new());
        let (tx, rx) = crossbeam_channel::unbounded();
        let dispatcher = Dispatcher::new(Handle::current(), api.clone(), tx);

        dispatcher.dispatch(DashboardCommand::StartDownload { game: "g1".to_string() });

        let event = tokio::task::spawn_blocking(move || {
            rx.recv_timeout(std::time::Duration::from_secs(5))
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(event, WorkerEvent::DownloadStarted { game: "g1".to_string() });
    }
}
