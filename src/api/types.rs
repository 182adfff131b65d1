//! Wire types of the download manager API

use serde::{Deserialize, Serialize};
use std::fmt;

/// lgogdownloader platform bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    /// All platforms in display order
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Mac, Platform::Linux];

    /// Numeric id used in API paths
    pub fn id(&self) -> u32 {
        match self {
            Platform::Windows => 1,
            Platform::Mac => 2,
            Platform::Linux => 4,
        }
    }

    /// Platforms contained in an lgogdownloader platform bitmask
    pub fn from_mask(mask: u32) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|p| mask & p.id() != 0)
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
        }
    }

    /// Short label for platform toggle buttons
    pub fn short_label(&self) -> &'static str {
        match self {
            Platform::Windows => "Win",
            Platform::Mac => "Mac",
            Platform::Linux => "Lin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a platform toggle for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    /// Whether the game's files for the selected platforms are missing
    #[serde(default)]
    pub missing: bool,
}

/// Server-side state of a download job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobState {
    Running,
    Done,
    /// `new`, `queued`, `failed` or anything the dashboard does not act on
    Other(String),
}

impl From<String> for JobState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "running" => JobState::Running,
            "done" => JobState::Done,
            _ => JobState::Other(value),
        }
    }
}

/// Progress entry of the status poll response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobProgress {
    pub state: JobState,
    #[serde(default)]
    pub progress: f64,
}

impl JobProgress {
    /// Text shown in the row's progress indicator, e.g. `42 %`
    pub fn progress_text(&self) -> String {
        format_progress(self.progress)
    }
}

/// Format a progress number the way the server reports it
pub fn format_progress(progress: f64) -> String {
    if progress.fract() == 0.0 && progress.is_finite() {
        format!("{} %", progress as i64)
    } else {
        format!("{} %", progress)
    }
}

/// Body of `GET /user_status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserStatusReply {
    #[serde(default)]
    pub user_status: Option<String>,
}
