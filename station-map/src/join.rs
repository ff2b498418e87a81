//! Joining station information with live status.
//!
//! The information feed and the status feed are published independently and
//! keyed by station id. [`classify`] inner-joins them and assigns each joined
//! station its [`StationCategory`].
//!
//! Two behaviors are intentional and observable:
//!
//! - A station with no status record is dropped without error. Newly listed
//!   stations routinely appear in the information feed before the status feed.
//! - If the status feed lists a station id more than once, the last record
//!   wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{CategoryCounts, StationCategory, StationId, StationInfo, StationStatus};

/// A station joined with its status and classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedStation {
    pub station: StationInfo,
    pub status: StationStatus,
    pub category: StationCategory,
}

/// Join stations with their statuses and classify each one.
///
/// Output follows the order of `stations`, minus any station without a
/// matching status.
pub fn classify(stations: &[StationInfo], statuses: &[StationStatus]) -> Vec<ClassifiedStation> {
    let by_id: HashMap<&StationId, &StationStatus> = statuses
        .iter()
        .map(|status| (&status.station_id, status))
        .collect();

    stations
        .iter()
        .filter_map(|station| {
            let status = by_id.get(&station.station_id)?;
            Some(ClassifiedStation {
                station: station.clone(),
                status: (*status).clone(),
                category: StationCategory::from_status(status),
            })
        })
        .collect()
}

/// Tally the categories of a classified sequence.
pub fn count_categories(classified: &[ClassifiedStation]) -> CategoryCounts {
    CategoryCounts::tally(classified.iter().map(|c| c.category))
}
