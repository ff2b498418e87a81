//! GBFS feed DTOs.
//!
//! These types map directly onto the JSON published by GBFS feeds. Every
//! record field is optional and several accept more than one JSON shape,
//! because feed versions disagree: 1.x publishes flags as `0`/`1`, 2.x as
//! booleans, and 3.x localizes names and uses RFC 3339 timestamps.
//! Validation happens in [`super::convert`].

use serde::Deserialize;

/// Top-level envelope shared by every GBFS feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope {
    /// When the publisher last updated the data.
    pub last_updated: Option<Timestamp>,

    /// Seconds until the publisher expects to update again.
    pub ttl: Option<u32>,

    pub data: FeedData,
}

/// The `data` object of a station feed.
///
/// Records are kept as raw JSON so a single malformed record can be rejected
/// without failing the whole feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedData {
    pub stations: Vec<serde_json::Value>,
}

/// `last_updated`: POSIX seconds (GBFS 1.x/2.x) or RFC 3339 (GBFS 3.x).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Rfc3339(String),
}

/// A station id, published as a string by most feeds but as a number by some.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStationId {
    Text(String),
    Number(i64),
}

/// A boolean flag, published as `true`/`false` or `1`/`0`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Int(i64),
}

/// A station name: plain (GBFS 1.x/2.x) or localized (GBFS 3.x).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawName {
    Plain(String),
    Localized(Vec<LocalizedString>),
}

/// One translation of a localized string.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedString {
    pub text: String,
    pub language: Option<String>,
}

/// A record from `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationRecord {
    pub station_id: Option<RawStationId>,
    pub name: Option<RawName>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub capacity: Option<i64>,
}

/// A record from `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusRecord {
    pub station_id: Option<RawStationId>,
    pub is_installed: Option<RawFlag>,
    pub is_renting: Option<RawFlag>,
    pub num_bikes_available: Option<i64>,
}
