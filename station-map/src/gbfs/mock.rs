//! Local feed client for running without network access.
//!
//! Reads `station_information.json` and `station_status.json` from a
//! directory, e.g. snapshots saved from a live publisher. Files are re-read on
//! every fetch so edits show up without a restart.

use std::path::PathBuf;

use super::error::FeedError;
use super::types::FeedEnvelope;
use super::{FeedKind, parse_envelope};

/// Feed client that serves GBFS feeds from files.
#[derive(Debug, Clone)]
pub struct FileFeedClient {
    dir: PathBuf,
}

impl FileFeedClient {
    /// Create a client reading from `dir`.
    ///
    /// Fails if either feed file is missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, FeedError> {
        let dir = dir.into();

        for kind in [FeedKind::Information, FeedKind::Status] {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                return Err(FeedError::Io {
                    path: path.display().to_string(),
                    message: "feed file not found".to_string(),
                });
            }
        }

        Ok(Self { dir })
    }

    /// Read and decode one feed file.
    pub async fn fetch_envelope(&self, kind: FeedKind) -> Result<FeedEnvelope, FeedError> {
        let path = self.dir.join(kind.file_name());
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FeedError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        parse_envelope(kind, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    const INFO: &str = r#"{"last_updated": 1700000000, "ttl": 5, "data": {"stations": [
        {"station_id": "72", "name": "W 52 St & 11 Ave", "lat": 40.767, "lon": -73.993, "capacity": 55}
    ]}}"#;

    const STATUS: &str = r#"{"last_updated": 1700000000, "ttl": 5, "data": {"stations": [
        {"station_id": "72", "is_installed": 1, "is_renting": 1, "num_bikes_available": 9}
    ]}}"#;

    fn write_feeds(dir: &Path) {
        std::fs::write(dir.join("station_information.json"), INFO).unwrap();
        std::fs::write(dir.join("station_status.json"), STATUS).unwrap();
    }

    #[tokio::test]
    async fn reads_both_feeds() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());

        let client = FileFeedClient::new(dir.path()).unwrap();
        let info = client.fetch_envelope(FeedKind::Information).await.unwrap();
        let status = client.fetch_envelope(FeedKind::Status).await.unwrap();

        assert_eq!(info.data.stations.len(), 1);
        assert_eq!(status.data.stations.len(), 1);
    }

    #[test]
    fn missing_file_is_rejected_up_front() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("station_information.json"), INFO).unwrap();

        let err = FileFeedClient::new(dir.path()).unwrap_err();
        match err {
            FeedError::Io { path, .. } => assert!(path.ends_with("station_status.json")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_json_error() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());
        std::fs::write(dir.path().join("station_status.json"), "{ not json").unwrap();

        let client = FileFeedClient::new(dir.path()).unwrap();
        let err = client.fetch_envelope(FeedKind::Status).await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Json {
                feed: FeedKind::Status,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn bundled_sample_feeds() {
        use crate::domain::StationCategory;
        use crate::gbfs::{convert_information_feed, convert_status_feed};
        use crate::join::{classify, count_categories};

        let client = FileFeedClient::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/feeds")).unwrap();
        let info = convert_information_feed(client.fetch_envelope(FeedKind::Information).await.unwrap());
        let status = convert_status_feed(client.fetch_envelope(FeedKind::Status).await.unwrap());
        assert_eq!(info.rejected + status.rejected, 0);

        let classified = classify(&info.records, &status.records);
        assert_eq!(info.records.len(), 12);
        assert_eq!(classified.len(), 11);

        let counts = count_categories(&classified);
        assert_eq!(counts.get(StationCategory::ComingSoon), 1);
        assert_eq!(counts.get(StationCategory::Empty), 1);
        assert_eq!(counts.get(StationCategory::OutOfOrder), 1);
        assert_eq!(counts.get(StationCategory::Low), 3);
        assert_eq!(counts.get(StationCategory::Healthy), 5);
    }

    #[tokio::test]
    async fn file_removed_after_startup_is_io_error() {
        let dir = tempdir().unwrap();
        write_feeds(dir.path());

        let client = FileFeedClient::new(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("station_information.json")).unwrap();

        let err = client.fetch_envelope(FeedKind::Information).await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }
}
