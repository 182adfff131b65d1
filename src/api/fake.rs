//! In-memory API used by worker and app tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use super::{ApiError, ApiResult, DashboardApi, FileStatus, JobProgress, JobState, Platform, UserStatusReply};

#[derive(Default)]
pub struct FakeApi {
    /// Requests issued, as `METHOD path`
    pub calls: Mutex<Vec<String>>,
    pub missing: Mutex<HashMap<String, bool>>,
    pub default_platform: Mutex<HashMap<String, FileStatus>>,
    pub active: Mutex<Vec<String>>,
    pub progress: Mutex<HashMap<String, JobProgress>>,
    pub user_status: Mutex<Option<String>>,
    /// When set, every request fails with this HTTP status
    pub fail_with: Mutex<Option<u16>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_progress(&self, game: &str, state: &str, progress: f64) {
        self.progress.lock().insert(
            game.to_string(),
            JobProgress { state: JobState::from(state.to_string()), progress },
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().push(call);
        match *self.fail_with.lock() {
            Some(status) => Err(ApiError::Status {
                status,
                text: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn toggle_platform(&self, game: &str, platform: Platform) -> ApiResult<FileStatus> {
        self.record(format!("GET /platform/{}/{}", game, platform.id()))?;
        let missing = self.missing.lock().get(game).copied().unwrap_or(false);
        Ok(FileStatus { missing })
    }

    async fn toggle_default_platform(
        &self,
        platform: Platform,
    ) -> ApiResult<HashMap<String, FileStatus>> {
        self.record(format!("GET /default_platform/{}", platform.id()))?;
        Ok(self.default_platform.lock().clone())
    }

    async fn start_download(&self, game: &str) -> ApiResult<()> {
        self.record(format!("GET /download/{}", game))
    }

    async fn stop_download(&self, game: &str) -> ApiResult<()> {
        self.record(format!("GET /stop/{}", game))
    }

    async fn active_downloads(&self) -> ApiResult<Vec<String>> {
        self.record("GET /status".to_string())?;
        Ok(self.active.lock().clone())
    }

    async fn download_status(&self, games: &[String]) -> ApiResult<HashMap<String, JobProgress>> {
        self.record(format!("POST /status {}", games.join(",")))?;
        let progress = self.progress.lock();
        Ok(games
            .iter()
            .filter_map(|g| progress.get(g).map(|p| (g.clone(), p.clone())))
            .collect())
    }

    async fn user_status(&self) -> ApiResult<UserStatusReply> {
        self.record("GET /user_status".to_string())?;
        Ok(UserStatusReply { user_status: self.user_status.lock().clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_text_matches_status() {
        let api = FakeApi::new();

        *api.fail_with.lock() = Some(500);
        let err = api.start_download("g1").await.unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error");

        *api.fail_with.lock() = Some(502);
        let err = api.user_status().await.unwrap_err();
        assert_eq!(err.to_string(), "502 Bad Gateway");

        *api.fail_with.lock() = Some(599);
        let err = api.active_downloads().await.unwrap_err();
        assert_eq!(err.to_string(), "599 Unknown");
    }
}
