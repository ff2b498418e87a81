//! Caching layer for decoded feeds.
//!
//! Station information changes rarely; station status changes every few
//! seconds. Each feed gets its own cache with its own TTL, so a page load
//! within the window reuses the last decoded feed instead of refetching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{StationInfo, StationStatus};
use crate::gbfs::{Feed, FeedError, FeedKind, FeedSource};

/// Configuration for the feed cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for the station information feed.
    pub information_ttl: Duration,

    /// TTL for the station status feed.
    pub status_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            information_ttl: Duration::from_secs(300),
            status_ttl: Duration::from_secs(30),
        }
    }
}

/// Feed source with caching.
///
/// Each cache holds at most one entry, keyed by [`FeedKind`].
pub struct CachedFeeds {
    source: FeedSource,
    information: MokaCache<FeedKind, Arc<Feed<StationInfo>>>,
    status: MokaCache<FeedKind, Arc<Feed<StationStatus>>>,
}

impl CachedFeeds {
    /// Wrap a feed source.
    pub fn new(source: FeedSource, config: &CacheConfig) -> Self {
        Self {
            source,
            information: MokaCache::builder()
                .time_to_live(config.information_ttl)
                .max_capacity(1)
                .build(),
            status: MokaCache::builder()
                .time_to_live(config.status_ttl)
                .max_capacity(1)
                .build(),
        }
    }

    /// Station information, from cache if fresh.
    pub async fn information(&self) -> Result<Arc<Feed<StationInfo>>, FeedError> {
        let kind = FeedKind::Information;
        if let Some(cached) = self.information.get(&kind).await {
            return Ok(cached);
        }

        let feed = Arc::new(self.source.fetch_information().await?);
        debug!(feed = %kind, records = feed.records.len(), "caching feed");
        self.information.insert(kind, feed.clone()).await;
        Ok(feed)
    }

    /// Station status, from cache if fresh.
    pub async fn status(&self) -> Result<Arc<Feed<StationStatus>>, FeedError> {
        let kind = FeedKind::Status;
        if let Some(cached) = self.status.get(&kind).await {
            return Ok(cached);
        }

        let feed = Arc::new(self.source.fetch_status().await?);
        debug!(feed = %kind, records = feed.records.len(), "caching feed");
        self.status.insert(kind, feed.clone()).await;
        Ok(feed)
    }

    /// Both feeds, requested concurrently.
    ///
    /// Fails if either feed fails.
    pub async fn both(
        &self,
    ) -> Result<(Arc<Feed<StationInfo>>, Arc<Feed<StationStatus>>), FeedError> {
        tokio::try_join!(self.information(), self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbfs::FileFeedClient;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_status(dir: &Path, bikes: u32) {
        let status = format!(
            r#"{{"data": {{"stations": [
                {{"station_id": "1", "is_installed": true, "is_renting": true, "num_bikes_available": {bikes}}}
            ]}}}}"#
        );
        std::fs::write(dir.join("station_status.json"), status).unwrap();
    }

    fn write_feeds(dir: &Path) {
        std::fs::write(
            dir.join("station_information.json"),
            r#"{"data": {"stations": [
                {"station_id": "1", "name": "One", "lat": 40.7, "lon": -74.0, "capacity": 10}
            ]}}"#,
        )
        .unwrap();
        write_status(dir, 7);
    }

    fn cached(dir: &Path, config: &CacheConfig) -> CachedFeeds {
        let source = FeedSource::Files(FileFeedClient::new(dir).unwrap());
        CachedFeeds::new(source, config)
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.information_ttl, Duration::from_secs(300));
        assert_eq!(config.status_ttl, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn fresh_entry_is_reused() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());
        let feeds = cached(dir.path(), &CacheConfig::default());

        let first = feeds.status().await.unwrap();
        assert_eq!(first.records[0].num_bikes_available, 7);

        write_status(dir.path(), 2);
        let second = feeds.status().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records[0].num_bikes_available, 7);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());
        let config = CacheConfig {
            information_ttl: Duration::from_secs(300),
            status_ttl: Duration::from_millis(50),
        };
        let feeds = cached(dir.path(), &config);

        feeds.status().await.unwrap();
        write_status(dir.path(), 3);
        tokio::time::sleep(Duration::from_millis(150)).await;

        let refreshed = feeds.status().await.unwrap();
        assert_eq!(refreshed.records[0].num_bikes_available, 3);
    }

    #[tokio::test]
    async fn both_fails_if_either_fails() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());
        let feeds = cached(dir.path(), &CacheConfig::default());

        std::fs::write(dir.path().join("station_information.json"), "[]").unwrap();
        let err = feeds.both().await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Json {
                feed: FeedKind::Information,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn both_returns_both_feeds() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());
        let feeds = cached(dir.path(), &CacheConfig::default());

        let (info, status) = feeds.both().await.unwrap();
        assert_eq!(info.records.len(), 1);
        assert_eq!(status.records.len(), 1);
    }
}
