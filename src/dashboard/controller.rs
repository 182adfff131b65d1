//! Dashboard controller
//!
//! Applies worker results and user input to the dashboard state. All
//! mutation of the active-downloads set and of the view state goes through
//! here, on the UI thread.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::{JobProgress, JobState, Platform};
use crate::dashboard::filter::TextFilter;
use crate::dashboard::state::{DashboardState, LibraryState, Notice, UserIcon};
use crate::shared::{DashboardCommand, SharedAppState, UserStatus, WorkerEvent};

/// Something the user did in the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Needs a server round trip
    Command(DashboardCommand),
    /// Search field edited
    SetQuery(String),
    /// Search clear button
    ClearQuery,
    /// Downloads-only toggle
    ToggleDownloadsOnly,
    /// Click landed outside any open modal
    DismissModals,
    /// Notice banner closed
    DismissNotice,
}

pub struct DashboardController {
    shared: Arc<RwLock<SharedAppState>>,
    state: DashboardState,
    /// Last session status shown; `None` until the first poll arrives
    user_status: Option<UserStatus>,
    last_status_seq: u64,
    last_user_seq: u64,
}

impl DashboardController {
    pub fn new(shared: Arc<RwLock<SharedAppState>>, library: LibraryState) -> Self {
        Self {
            shared,
            state: DashboardState::new(library),
            user_status: None,
            last_status_seq: 0,
            last_user_seq: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[cfg(test)]
    pub fn user_status(&self) -> Option<UserStatus> {
        self.user_status
    }

    #[cfg(test)]
    pub fn active_downloads(&self) -> Vec<String> {
        self.shared.read().downloads.snapshot()
    }

    #[cfg(test)]
    pub fn is_downloading(&self, game: &str) -> bool {
        self.shared.read().downloads.contains(game)
    }

    /// Apply a user action; returns the request to send, if any
    pub fn handle(&mut self, action: UiAction) -> Option<DashboardCommand> {
        match action {
            UiAction::Command(command) => return Some(command),
            UiAction::SetQuery(query) => self.set_query(&query),
            UiAction::ClearQuery => self.set_query(""),
            UiAction::ToggleDownloadsOnly => self.toggle_downloads_only(),
            UiAction::DismissModals => self.state.modals.close_all(),
            UiAction::DismissNotice => self.state.notice = None,
        }
        None
    }

    /// Apply a worker result
    pub fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Bootstrapped { active } => self.on_bootstrapped(active),
            WorkerEvent::PlatformToggled { game, platform, missing } => {
                self.on_platform_toggled(&game, platform, missing)
            }
            WorkerEvent::DefaultPlatformToggled { platform, games } => {
                self.on_default_platform_toggled(platform, games)
            }
            WorkerEvent::DownloadStarted { game } => self.on_download_started(&game),
            WorkerEvent::DownloadStopped { game } => self.on_download_stopped(&game),
            WorkerEvent::StatusPolled { seq, games } => self.on_status_polled(seq, games),
            WorkerEvent::UserStatusPolled { seq, status } => self.on_user_status(seq, status),
            WorkerEvent::RequestFailed { action, reason } => self.on_failure(action, reason),
        }
    }

    fn on_bootstrapped(&mut self, active: Vec<String>) {
        let active = {
            let mut shared = self.shared.write();
            shared.downloads.replace_all(&active);
            shared.downloads.snapshot()
        };
        self.state.bootstrapped = true;
        info!("Current active downloads: {:?}", active);
        for game in &active {
            self.state.library.ensure(game).show_downloading();
        }
    }

    fn on_platform_toggled(&mut self, game: &str, platform: Platform, missing: bool) {
        let Some(row) = self.state.library.get_mut(game) else {
            debug!("Platform toggled for unknown game {}", game);
            return;
        };
        if let Some(control) = row.platform_mut(platform) {
            control.toggle();
        }
        row.set_missing(missing);
    }

    fn on_default_platform_toggled(&mut self, platform: Platform, games: BTreeMap<String, bool>) {
        if let Some(control) = self
            .state
            .default_platforms
            .iter_mut()
            .find(|c| c.platform == platform)
        {
            control.toggle();
        }
        info!("Default platform {} toggled, {} games affected", platform, games.len());
        for (game, missing) in games {
            self.on_platform_toggled(&game, platform, missing);
        }
    }

    fn on_download_started(&mut self, game: &str) {
        self.shared.write().downloads.insert(game);
        self.state.library.ensure(game).show_downloading();
    }

    fn on_download_stopped(&mut self, game: &str) {
        self.shared.write().downloads.remove(game);
        if let Some(row) = self.state.library.get_mut(game) {
            row.show_stopped();
        }
    }

    fn on_status_polled(&mut self, seq: u64, games: BTreeMap<String, JobProgress>) {
        if seq <= self.last_status_seq {
            debug!("Ignoring stale status response {} (have {})", seq, self.last_status_seq);
            return;
        }
        self.last_status_seq = seq;

        let mut shared = self.shared.write();
        for (game, progress) in &games {
            match progress.state {
                JobState::Running => {
                    if let Some(row) = self.state.library.get_mut(game) {
                        row.progress_text = progress.progress_text();
                    }
                }
                JobState::Done => {
                    info!("Download of {} finished", game);
                    if let Some(row) = self.state.library.get_mut(game) {
                        row.progress_text = progress.progress_text();
                        row.show_finished();
                    }
                    shared.downloads.remove(game);
                }
                JobState::Other(_) => {}
            }
        }

        let remaining = shared.downloads.len();
        if remaining > 0 {
            self.state.downloads.count = remaining;
            self.state.downloads.visible = true;
        } else if !self.state.filter.downloads_only {
            self.state.downloads.visible = false;
        }
    }

    fn on_user_status(&mut self, seq: u64, status: UserStatus) {
        if seq <= self.last_user_seq {
            debug!("Ignoring stale user status response {} (have {})", seq, self.last_user_seq);
            return;
        }
        self.last_user_seq = seq;

        if self.user_status == Some(status) {
            return;
        }
        info!("User status changed: {:?} -> {:?}", self.user_status, status);
        self.user_status = Some(status);

        self.state.user.icon = UserIcon::for_status(status);
        self.state.user.status_line = status.status_line().to_string();
        match status {
            UserStatus::Unauthenticated => self.state.modals.login = true,
            UserStatus::RunningTwoFactor => self.state.modals.two_factor = true,
            _ => {}
        }
    }

    fn on_failure(&mut self, action: String, reason: String) {
        self.state.notice = Some(Notice { action, reason });
    }

    fn set_query(&mut self, query: &str) {
        if self.state.filter.downloads_only {
            self.set_downloads_only(false);
        }
        self.state.filter.query = query.to_string();

        let filter = TextFilter::new(query);
        if filter.is_empty() {
            for row in self.state.library.iter_mut() {
                row.visible = true;
            }
            self.state.filter.clear_visible = !query.is_empty();
            return;
        }

        for row in self.state.library.iter_mut() {
            row.visible = filter.matches(&row.search_text());
        }
        self.state.filter.clear_visible = true;
    }

    fn toggle_downloads_only(&mut self) {
        let enabled = !self.state.filter.downloads_only;
        self.set_downloads_only(enabled);
    }

    fn set_downloads_only(&mut self, enabled: bool) {
        self.state.filter.downloads_only = enabled;
        let shared = self.shared.read();

        if enabled {
            self.state.filter.query.clear();
            self.state.filter.clear_visible = false;
            for row in self.state.library.iter_mut() {
                row.visible = shared.downloads.contains(&row.id);
            }
        } else {
            for row in self.state.library.iter_mut() {
                row.visible = true;
            }
            if shared.downloads.is_empty() {
                self.state.downloads.visible = false;
            }
        }
    }
}
