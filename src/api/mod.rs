//! Download Manager API
//!
//! Client side of the server's HTTP API. The dashboard talks to the server
//! only through the [`DashboardApi`] trait so the worker can be driven by an
//! in-memory fake in tests.

pub mod client;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

pub use client::HttpApi;
pub use types::{FileStatus, JobProgress, JobState, Platform, UserStatusReply};

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} {text}")]
    Status { status: u16, text: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Endpoints consumed by the dashboard
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /platform/{game}/{platform}`
    async fn toggle_platform(&self, game: &str, platform: Platform) -> ApiResult<FileStatus>;

    /// `GET /default_platform/{platform}`
    async fn toggle_default_platform(
        &self,
        platform: Platform,
    ) -> ApiResult<HashMap<String, FileStatus>>;

    /// `GET /download/{game}`
    async fn start_download(&self, game: &str) -> ApiResult<()>;

    /// `GET /stop/{game}`
    async fn stop_download(&self, game: &str) -> ApiResult<()>;

    /// `GET /status`: identifiers the server is currently downloading
    async fn active_downloads(&self) -> ApiResult<Vec<String>>;

    /// `POST /status` with the identifiers to report on
    async fn download_status(&self, games: &[String]) -> ApiResult<HashMap<String, JobProgress>>;

    /// `GET /user_status`
    async fn user_status(&self) -> ApiResult<UserStatusReply>;
}
