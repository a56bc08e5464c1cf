// src/extraction/fetcher.rs
use super::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches offer letter pages. One GET per call, no retries; redirects
/// follow the client default.
pub struct ContentFetcher {
    client: Client,
}

impl ContentFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Any non-success status is an error; the body is returned as text.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        info!("Fetching offer letter: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        response.text().await.map_err(FetchError::Body)
    }
}
