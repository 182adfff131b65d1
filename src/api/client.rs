//! reqwest implementation of the download manager API

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::{ApiError, ApiResult, DashboardApi, FileStatus, JobProgress, Platform, UserStatusReply};

/// HTTP client bound to one server
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Build an endpoint URL; every segment is percent-encoded on its own
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> ApiResult<Response> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        check_status(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let response = self.get(segments).await?;
        decode(response).await
    }
}

fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn toggle_platform(&self, game: &str, platform: Platform) -> ApiResult<FileStatus> {
        let platform = platform.id().to_string();
        self.get_json(&["platform", game, &platform]).await
    }

    async fn toggle_default_platform(
        &self,
        platform: Platform,
    ) -> ApiResult<HashMap<String, FileStatus>> {
        let platform = platform.id().to_string();
        self.get_json(&["default_platform", &platform]).await
    }

    async fn start_download(&self, game: &str) -> ApiResult<()> {
        self.get(&["download", game]).await?;
        Ok(())
    }

    async fn stop_download(&self, game: &str) -> ApiResult<()> {
        self.get(&["stop", game]).await?;
        Ok(())
    }

    async fn active_downloads(&self) -> ApiResult<Vec<String>> {
        self.get_json(&["status"]).await
    }

    async fn download_status(&self, games: &[String]) -> ApiResult<HashMap<String, JobProgress>> {
        let url = self.endpoint(&["status"])?;
        debug!("POST {} ({} games)", url, games.len());
        let response = self.client.post(url).json(games).send().await?;
        decode(check_status(response)?).await
    }

    async fn user_status(&self) -> ApiResult<UserStatusReply> {
        self.get_json(&["user_status"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = api("http://127.0.0.1:5000");
        let url = api.endpoint(&["platform", "witcher_3", "4"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/platform/witcher_3/4");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = api("http://nas.local/gog/");
        let url = api.endpoint(&["user_status"]).unwrap();
        assert_eq!(url.as_str(), "http://nas.local/gog/user_status");
    }

    #[test]
    fn test_endpoint_encodes_identifiers() {
        let api = api("http://127.0.0.1:5000");
        let url = api.endpoint(&["download", "a/b c#1"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/download/a%2Fb%20c%231");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpApi::new("not a url", Duration::from_secs(5)),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpApi::new("mailto:someone@example.com", Duration::from_secs(5)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status { status: 500, text: "Internal Server Error".to_string() };
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }
}
