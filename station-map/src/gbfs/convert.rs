//! Conversion from GBFS DTOs to domain types.
//!
//! Records are converted one at a time. A record that fails conversion is
//! logged and counted, and the rest of the feed is kept.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{StationId, StationInfo, StationStatus};

use super::FeedKind;
use super::types::{
    FeedEnvelope, RawFlag, RawName, RawStationId, StationInformationRecord, StationStatusRecord,
    Timestamp,
};

/// Error converting a single feed record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The record is not an object of the expected shape
    #[error("malformed record: {0}")]
    Malformed(String),

    /// A required field is absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but its value is out of range
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// A decoded feed: converted records plus feed metadata.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    pub records: Vec<T>,

    /// When the publisher last updated the feed, if it said.
    pub last_updated: Option<DateTime<Utc>>,

    /// Publisher's refresh interval in seconds, if it said.
    pub ttl: Option<u32>,

    /// Number of records dropped because they failed conversion.
    pub rejected: usize,
}

/// Convert a station information envelope.
pub fn convert_information_feed(envelope: FeedEnvelope) -> Feed<StationInfo> {
    convert_feed(envelope, FeedKind::Information, |r: StationInformationRecord| {
        convert_information(&r)
    })
}

/// Convert a station status envelope.
pub fn convert_status_feed(envelope: FeedEnvelope) -> Feed<StationStatus> {
    convert_feed(envelope, FeedKind::Status, |r: StationStatusRecord| {
        convert_status(&r)
    })
}

fn convert_feed<R, T>(
    envelope: FeedEnvelope,
    kind: FeedKind,
    convert: impl Fn(R) -> Result<T, ConversionError>,
) -> Feed<T>
where
    R: DeserializeOwned,
{
    let last_updated = envelope.last_updated.as_ref().and_then(|ts| {
        let parsed = convert_timestamp(ts);
        if parsed.is_none() {
            debug!(feed = %kind, ?ts, "ignoring unparseable last_updated");
        }
        parsed
    });

    let mut records = Vec::with_capacity(envelope.data.stations.len());
    let mut rejected = 0;

    for (index, value) in envelope.data.stations.into_iter().enumerate() {
        let station_id = value
            .get("station_id")
            .map(|id| id.to_string())
            .unwrap_or_default();

        let result = serde_json::from_value::<R>(value)
            .map_err(|e| ConversionError::Malformed(e.to_string()))
            .and_then(&convert);

        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(feed = %kind, index, station_id = %station_id, error = %e, "skipping record");
                rejected += 1;
            }
        }
    }

    Feed {
        records,
        last_updated,
        ttl: envelope.ttl,
        rejected,
    }
}

/// Convert a single information record.
pub fn convert_information(record: &StationInformationRecord) -> Result<StationInfo, ConversionError> {
    let station_id = convert_station_id(record.station_id.as_ref())?;

    let name = match record.name.as_ref() {
        Some(RawName::Plain(name)) => name.clone(),
        Some(RawName::Localized(names)) => names
            .first()
            .map(|n| n.text.clone())
            .ok_or(ConversionError::MissingField("name"))?,
        None => return Err(ConversionError::MissingField("name")),
    };

    let lat = record.lat.ok_or(ConversionError::MissingField("lat"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ConversionError::InvalidValue {
            field: "lat",
            value: lat.to_string(),
        });
    }

    let lon = record.lon.ok_or(ConversionError::MissingField("lon"))?;
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ConversionError::InvalidValue {
            field: "lon",
            value: lon.to_string(),
        });
    }

    let capacity = convert_count("capacity", record.capacity)?;

    Ok(StationInfo {
        station_id,
        name,
        lat,
        lon,
        capacity,
    })
}

/// Convert a single status record.
pub fn convert_status(record: &StationStatusRecord) -> Result<StationStatus, ConversionError> {
    Ok(StationStatus {
        station_id: convert_station_id(record.station_id.as_ref())?,
        is_installed: convert_flag("is_installed", record.is_installed)?,
        is_renting: convert_flag("is_renting", record.is_renting)?,
        num_bikes_available: convert_count("num_bikes_available", record.num_bikes_available)?,
    })
}

fn convert_station_id(raw: Option<&RawStationId>) -> Result<StationId, ConversionError> {
    let text = match raw.ok_or(ConversionError::MissingField("station_id"))? {
        RawStationId::Text(s) => s.clone(),
        RawStationId::Number(n) => n.to_string(),
    };
    StationId::parse(&text).map_err(|_| ConversionError::InvalidValue {
        field: "station_id",
        value: format!("{text:?}"),
    })
}

fn convert_flag(field: &'static str, raw: Option<RawFlag>) -> Result<bool, ConversionError> {
    match raw.ok_or(ConversionError::MissingField(field))? {
        RawFlag::Bool(b) => Ok(b),
        RawFlag::Int(0) => Ok(false),
        RawFlag::Int(1) => Ok(true),
        RawFlag::Int(n) => Err(ConversionError::InvalidValue {
            field,
            value: n.to_string(),
        }),
    }
}

fn convert_count(field: &'static str, raw: Option<i64>) -> Result<u32, ConversionError> {
    let n = raw.ok_or(ConversionError::MissingField(field))?;
    u32::try_from(n).map_err(|_| ConversionError::InvalidValue {
        field,
        value: n.to_string(),
    })
}

fn convert_timestamp(ts: &Timestamp) -> Option<DateTime<Utc>> {
    match ts {
        Timestamp::Epoch(secs) => DateTime::from_timestamp(*secs, 0),
        Timestamp::Rfc3339(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
