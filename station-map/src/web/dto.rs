//! Data transfer objects for the map payload and API responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MapConfig;
use crate::domain::StationCategory;
use crate::join::ClassifiedStation;
use crate::snapshot::MapSnapshot;

/// Everything the browser-side renderer needs to draw the map.
///
/// Served at `/api/stations` and embedded in the map page.
#[derive(Debug, Serialize)]
pub struct MapPayload {
    /// Initial view and tile source
    pub map: MapConfig,

    /// Display metadata for every category, in legend order
    pub categories: Vec<CategoryResult>,

    /// One marker per classified station
    pub stations: Vec<StationMarker>,

    /// When the information feed was last published
    pub information_updated: Option<DateTime<Utc>>,

    /// When the status feed was last published
    pub status_updated: Option<DateTime<Utc>>,

    /// Feed records dropped for failing validation
    pub rejected_records: usize,

    /// Stations not shown because they have no status
    pub unmatched_stations: usize,
}

impl MapPayload {
    /// Build the payload for a snapshot.
    pub fn new(map: &MapConfig, snapshot: &MapSnapshot) -> Self {
        let categories = StationCategory::ALL
            .into_iter()
            .map(|c| CategoryResult::new(c, snapshot.counts.get(c)))
            .collect();

        let stations = snapshot.stations.iter().map(StationMarker::from).collect();

        Self {
            map: map.clone(),
            categories,
            stations,
            information_updated: snapshot.information_updated,
            status_updated: snapshot.status_updated,
            rejected_records: snapshot.rejected_records,
            unmatched_stations: snapshot.unmatched_stations,
        }
    }
}

/// A category with its display metadata.
#[derive(Debug, Serialize)]
pub struct CategoryResult {
    /// Category identifier (e.g. `out_of_order`)
    pub category: StationCategory,

    /// Map layer key (e.g. `outOfOrder`)
    pub layer: &'static str,

    pub label: &'static str,

    /// Font Awesome glyph
    pub glyph: &'static str,

    /// ExtraMarkers color name
    pub marker_color: &'static str,

    /// CSS color for the legend swatch
    pub legend_color: &'static str,

    /// Stations in this category
    pub count: usize,
}

impl CategoryResult {
    pub fn new(category: StationCategory, count: usize) -> Self {
        Self {
            category,
            layer: category.layer_key(),
            label: category.label(),
            glyph: category.glyph(),
            marker_color: category.marker_color(),
            legend_color: category.legend_color(),
            count,
        }
    }
}

/// A station marker.
#[derive(Debug, Serialize)]
pub struct StationMarker {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: u32,
    pub num_bikes_available: u32,
    pub is_installed: bool,
    pub is_renting: bool,

    /// Category identifier
    pub category: StationCategory,

    /// Map layer the marker belongs to
    pub layer: &'static str,
}

impl From<&ClassifiedStation> for StationMarker {
    fn from(c: &ClassifiedStation) -> Self {
        Self {
            station_id: c.station.station_id.as_str().to_string(),
            name: c.station.name.clone(),
            lat: c.station.lat,
            lon: c.station.lon,
            capacity: c.station.capacity,
            num_bikes_available: c.status.num_bikes_available,
            is_installed: c.status.is_installed,
            is_renting: c.status.is_renting,
            category: c.category,
            layer: c.category.layer_key(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryCounts, StationId, StationInfo, StationStatus};

    fn snapshot() -> MapSnapshot {
        let station = StationInfo {
            station_id: StationId::parse("72").unwrap(),
            name: "W 52 St & 11 Ave".to_string(),
            lat: 40.767,
            lon: -73.993,
            capacity: 55,
        };
        let status = StationStatus {
            station_id: StationId::parse("72").unwrap(),
            is_installed: true,
            is_renting: false,
            num_bikes_available: 3,
        };
        let stations = vec![ClassifiedStation {
            station,
            status,
            category: StationCategory::OutOfOrder,
        }];
        MapSnapshot {
            counts: CategoryCounts::tally([StationCategory::OutOfOrder]),
            stations,
            information_updated: None,
            status_updated: DateTime::from_timestamp(1_700_000_000, 0),
            rejected_records: 2,
            unmatched_stations: 1,
        }
    }

    #[test]
    fn payload_json_shape() {
        let payload = MapPayload::new(&MapConfig::default(), &snapshot());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["map"]["zoom"], 12);
        assert_eq!(json["categories"].as_array().unwrap().len(), 5);
        assert_eq!(json["categories"][2]["category"], "out_of_order");
        assert_eq!(json["categories"][2]["layer"], "outOfOrder");
        assert_eq!(json["categories"][2]["count"], 1);
        assert_eq!(json["categories"][0]["count"], 0);

        let marker = &json["stations"][0];
        assert_eq!(marker["station_id"], "72");
        assert_eq!(marker["name"], "W 52 St & 11 Ave");
        assert_eq!(marker["capacity"], 55);
        assert_eq!(marker["num_bikes_available"], 3);
        assert_eq!(marker["category"], "out_of_order");
        assert_eq!(marker["layer"], "outOfOrder");

        assert!(json["information_updated"].is_null());
        assert_eq!(json["status_updated"], "2023-11-14T22:13:20Z");
        assert_eq!(json["rejected_records"], 2);
        assert_eq!(json["unmatched_stations"], 1);
    }

    #[test]
    fn category_result_carries_metadata() {
        let c = CategoryResult::new(StationCategory::Healthy, 7);
        assert_eq!(c.label, "Healthy Stations");
        assert_eq!(c.glyph, "fa-thumbs-up");
        assert_eq!(c.marker_color, "blue");
        assert_eq!(c.legend_color, "#0000ff");
        assert_eq!(c.count, 7);
    }
}
