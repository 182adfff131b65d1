//! Application Coordinator
//!
//! Owns the tokio runtime, the API client and the channel between the
//! worker and the dashboard, and keeps the poll loop alive for as long as
//! the dashboard window is open.

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{DashboardApi, HttpApi};
use crate::config::AppConfig;
use crate::dashboard::app::run_dashboard;
use crate::dashboard::{DashboardApp, DashboardController, GameRow, LibraryState};
use crate::shared::{SharedAppState, WorkerEvent};
use crate::storage::catalog;
use crate::worker::{Dispatcher, Poller};

/// Main application coordinator
pub struct GogDashboard {
    /// Shared state between dashboard and worker
    pub shared_state: Arc<RwLock<SharedAppState>>,
    runtime: Runtime,
    api: Arc<dyn DashboardApi>,
    events_tx: Sender<WorkerEvent>,
    events_rx: Receiver<WorkerEvent>,
    cancel: CancellationToken,
}

impl GogDashboard {
    /// Create a coordinator talking to the configured server
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = HttpApi::new(&config.server.base_url, config.server.request_timeout())
            .context("Failed to create API client")?;
        Self::with_api(config, Arc::new(api))
    }

    /// Create a coordinator around any API implementation
    pub fn with_api(config: AppConfig, api: Arc<dyn DashboardApi>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("dashboard-worker")
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        let (events_tx, events_rx) = unbounded();

        Ok(Self {
            shared_state: Arc::new(RwLock::new(SharedAppState::new(config))),
            runtime,
            api,
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
        })
    }

    /// Build the game rows from the local lgogdownloader catalog
    pub fn load_library(&self) -> LibraryState {
        let library = self.shared_state.read().config.library.clone();
        match catalog::load_catalog(&library.game_details_path(), &library.library_path()) {
            Ok(games) => {
                info!("Loaded {} games from {:?}", games.len(), library.game_details_path());
                LibraryState::from_rows(games.iter().map(GameRow::from_catalog))
            }
            Err(e) => {
                warn!("{:#}", e);
                LibraryState::default()
            }
        }
    }

    /// Fetch the active downloads and start polling
    pub fn start_worker(&self) -> Dispatcher {
        let dispatcher = Dispatcher::new(
            self.runtime.handle().clone(),
            self.api.clone(),
            self.events_tx.clone(),
        );
        dispatcher.bootstrap();

        let poller = Poller::new(self.api.clone(), self.shared_state.clone(), self.events_tx.clone());
        self.runtime.spawn(poller.run(self.cancel.child_token()));

        dispatcher
    }

    /// Receiver for worker results
    pub fn events(&self) -> Receiver<WorkerEvent> {
        self.events_rx.clone()
    }

    /// Run the dashboard window until it is closed
    pub fn run(self) -> Result<()> {
        let library = self.load_library();
        let controller = DashboardController::new(self.shared_state.clone(), library);
        let dispatcher = self.start_worker();
        let app = DashboardApp::new(self.shared_state.clone(), controller, dispatcher, self.events());

        let result = run_dashboard(app).map_err(|e| anyhow::anyhow!("Dashboard error: {}", e));
        self.shutdown();
        result
    }

    /// Stop the poll loop
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for GogDashboard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_start_worker_bootstraps() {
        let api = Arc::new(FakeApi::new());
        *api.active.lock() = vec!["g1".to_string()];
        let app = GogDashboard::with_api(AppConfig::default(), api.clone()).unwrap();

        app.start_worker();
        let event = app.events().recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(event, WorkerEvent::Bootstrapped { active: vec!["g1".to_string()] });
        assert_eq!(api.calls(), vec!["GET /status"]);
        app.shutdown();
    }

    #[test]
    fn test_load_library_from_catalog() {
        let cache = TempDir::new().unwrap();
        std::fs::write(
            cache.path().join("gamedetails.json"),
            r#"{"games": [{"gamename": "witcher_3", "title": "The Witcher 3"}]}"#,
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.library.cache_dir = cache.path().to_path_buf();
        config.library.library_dir = PathBuf::from("/nonexistent/library");

        let app = GogDashboard::with_api(config, Arc::new(FakeApi::new())).unwrap();
        let library = app.load_library();

        assert_eq!(library.len(), 1);
        assert_eq!(library.get("witcher_3").unwrap().title, "The Witcher 3");
    }

    #[test]
    fn test_missing_catalog_gives_empty_library() {
        let mut config = AppConfig::default();
        config.library.cache_dir = PathBuf::from("/nonexistent/cache");

        let app = GogDashboard::with_api(config, Arc::new(FakeApi::new())).unwrap();
        assert!(app.load_library().is_empty());
    }
}
