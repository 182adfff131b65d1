//! Message types for communication between dashboard and worker

use std::collections::BTreeMap;

use crate::api::{JobProgress, Platform};
use crate::shared::state::UserStatus;

/// User actions sent from the dashboard to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Enable/disable one platform for one game
    TogglePlatform { game: String, platform: Platform },
    /// Change the default platform for the whole library
    ToggleDefaultPlatform { platform: Platform },
    /// Schedule a download
    StartDownload { game: String },
    /// Cancel a download
    StopDownload { game: String },
}

impl DashboardCommand {
    /// Short description used in failure notices
    pub fn describe(&self) -> String {
        match self {
            DashboardCommand::TogglePlatform { game, platform } => {
                format!("Toggle {} for {}", platform, game)
            }
            DashboardCommand::ToggleDefaultPlatform { platform } => {
                format!("Toggle default platform {}", platform)
            }
            DashboardCommand::StartDownload { game } => format!("Start download of {}", game),
            DashboardCommand::StopDownload { game } => format!("Stop download of {}", game),
        }
    }
}

/// Results sent from the worker to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// Authoritative list of active downloads at startup
    Bootstrapped { active: Vec<String> },
    /// A per-game platform toggle succeeded
    PlatformToggled { game: String, platform: Platform, missing: bool },
    /// The default platform toggle succeeded
    DefaultPlatformToggled { platform: Platform, games: BTreeMap<String, bool> },
    /// A download was scheduled
    DownloadStarted { game: String },
    /// A download was cancelled
    DownloadStopped { game: String },
    /// Status poll response, tagged with its request sequence number
    StatusPolled { seq: u64, games: BTreeMap<String, JobProgress> },
    /// User status poll response, tagged with its request sequence number
    UserStatusPolled { seq: u64, status: UserStatus },
    /// A request failed
    RequestFailed { action: String, reason: String },
}
