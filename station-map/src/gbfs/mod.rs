//! GBFS (General Bikeshare Feed Specification) feed access.
//!
//! Two feeds matter here:
//! - `station_information.json`: where stations are, what they are called,
//!   how many docks they have. Changes rarely.
//! - `station_status.json`: live bike counts and installed/renting flags.
//!   Publishers typically refresh it every few seconds.
//!
//! Both share the envelope `{ last_updated, ttl, data: { stations: [...] } }`.
//! Records are decoded leniently (see [`types`]) and validated into domain
//! types by [`convert`].

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::fmt;

use crate::domain::{StationInfo, StationStatus};

pub use client::{FeedConfig, GbfsClient};
pub use convert::{
    ConversionError, Feed, convert_information, convert_information_feed, convert_status,
    convert_status_feed,
};
pub use error::FeedError;
pub use mock::FileFeedClient;
pub use types::{FeedEnvelope, StationInformationRecord, StationStatusRecord};

/// Which of the two station feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Information,
    Status,
}

impl FeedKind {
    /// File name of this feed in a GBFS directory.
    pub fn file_name(self) -> &'static str {
        match self {
            FeedKind::Information => "station_information.json",
            FeedKind::Status => "station_status.json",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Information => f.write_str("station_information"),
            FeedKind::Status => f.write_str("station_status"),
        }
    }
}

/// Where feeds come from: the live publisher or a local directory.
#[derive(Debug, Clone)]
pub enum FeedSource {
    Live(GbfsClient),
    Files(FileFeedClient),
}

impl FeedSource {
    /// Fetch the raw envelope of one feed.
    pub async fn fetch_envelope(&self, kind: FeedKind) -> Result<FeedEnvelope, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch_envelope(kind).await,
            FeedSource::Files(client) => client.fetch_envelope(kind).await,
        }
    }

    /// Fetch and convert the station information feed.
    pub async fn fetch_information(&self) -> Result<Feed<StationInfo>, FeedError> {
        let envelope = self.fetch_envelope(FeedKind::Information).await?;
        Ok(convert_information_feed(envelope))
    }

    /// Fetch and convert the station status feed.
    pub async fn fetch_status(&self) -> Result<Feed<StationStatus>, FeedError> {
        let envelope = self.fetch_envelope(FeedKind::Status).await?;
        Ok(convert_status_feed(envelope))
    }
}

/// Decode a feed body into its envelope.
pub(crate) fn parse_envelope(kind: FeedKind, body: &str) -> Result<FeedEnvelope, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Json {
        feed: kind,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_kind_names() {
        assert_eq!(FeedKind::Information.to_string(), "station_information");
        assert_eq!(FeedKind::Status.to_string(), "station_status");
        assert_eq!(FeedKind::Information.file_name(), "station_information.json");
        assert_eq!(FeedKind::Status.file_name(), "station_status.json");
    }

    #[test]
    fn parse_envelope_rejects_non_gbfs() {
        let err = parse_envelope(FeedKind::Status, "<html>Not Found</html>").unwrap_err();
        assert!(matches!(
            err,
            FeedError::Json {
                feed: FeedKind::Status,
                ..
            }
        ));

        let err = parse_envelope(FeedKind::Information, r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, FeedError::Json { .. }));
    }

    #[test]
    fn parse_envelope_accepts_station_feed() {
        let envelope =
            parse_envelope(FeedKind::Information, r#"{"data": {"stations": []}}"#).unwrap();
        assert!(envelope.data.stations.is_empty());
    }
}
