//! GBFS HTTP client.

use std::time::Duration;

use tracing::debug;

use super::error::FeedError;
use super::types::FeedEnvelope;
use super::{FeedKind, parse_envelope};

/// Default station information feed (Citi Bike, New York City).
pub const DEFAULT_INFORMATION_URL: &str =
    "https://gbfs.citibikenyc.com/gbfs/en/station_information.json";

/// Default station status feed (Citi Bike, New York City).
pub const DEFAULT_STATUS_URL: &str = "https://gbfs.citibikenyc.com/gbfs/en/station_status.json";

/// Configuration for the GBFS client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// URL of `station_information.json`
    pub information_url: String,
    /// URL of `station_status.json`
    pub status_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config for the given feed URLs.
    pub fn new(information_url: impl Into<String>, status_url: impl Into<String>) -> Self {
        Self {
            information_url: information_url.into(),
            status_url: status_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// URL of one feed.
    pub fn url(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Information => &self.information_url,
            FeedKind::Status => &self.status_url,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INFORMATION_URL, DEFAULT_STATUS_URL)
    }
}

/// Client for a publisher's GBFS station feeds.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl GbfsClient {
    /// Create a new GBFS client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the raw envelope of one feed.
    pub async fn fetch_envelope(&self, kind: FeedKind) -> Result<FeedEnvelope, FeedError> {
        let url = self.config.url(kind);
        debug!(feed = %kind, url, "fetching feed");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                feed: kind,
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_envelope(kind, &body)
    }
}
