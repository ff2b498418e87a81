//! A classified view of the network at one moment.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{CategoryCounts, StationInfo, StationStatus};
use crate::gbfs::Feed;
use crate::join::{ClassifiedStation, classify, count_categories};

/// Every station with a known status, classified, plus feed metadata.
#[derive(Debug, Clone)]
pub struct MapSnapshot {
    /// Classified stations, in information-feed order.
    pub stations: Vec<ClassifiedStation>,
    pub counts: CategoryCounts,
    pub information_updated: Option<DateTime<Utc>>,
    pub status_updated: Option<DateTime<Utc>>,
    /// Records dropped from either feed for failing validation.
    pub rejected_records: usize,
    /// Stations left off the map because the status feed does not list them.
    pub unmatched_stations: usize,
}

impl MapSnapshot {
    /// Join and classify two decoded feeds.
    pub fn build(information: &Feed<StationInfo>, status: &Feed<StationStatus>) -> Self {
        let stations = classify(&information.records, &status.records);
        let counts = count_categories(&stations);
        let unmatched_stations = information.records.len().saturating_sub(stations.len());

        debug!(
            classified = stations.len(),
            unmatched = unmatched_stations,
            "built map snapshot"
        );

        Self {
            counts,
            information_updated: information.last_updated,
            status_updated: status.last_updated,
            rejected_records: information.rejected + status.rejected,
            unmatched_stations,
            stations,
        }
    }
}
