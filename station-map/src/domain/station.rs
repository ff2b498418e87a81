//! Station identity, information and status types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A non-empty station identifier, as published by the feeds.
///
/// Identifiers are opaque: the only operation that matters is equality, which
/// is what the information and status feeds are joined on. The id is kept
/// exactly as published, so `" 72"` and `"72"` are different stations.
///
/// # Examples
///
/// ```
/// use station_map::domain::StationId;
///
/// let id = StationId::parse("72").unwrap();
/// assert_eq!(id.as_str(), "72");
///
/// assert_ne!(StationId::parse(" 72").unwrap(), id);
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.trim().is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }
        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static description of a physical station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub station_id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: u32,
}

/// Live operational state of a station.
///
/// The station id is a foreign key into the information feed, but nothing
/// guarantees the matching station is present there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatus {
    pub station_id: StationId,
    pub is_installed: bool,
    pub is_renting: bool,
    pub num_bikes_available: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("72").is_ok());
        assert!(StationId::parse("66db237e-0aca-11e7-82f6-3863bb44ef7c").is_ok());
        assert!(StationId::parse("a").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse(" ").is_err());
        assert!(StationId::parse("\t\n").is_err());
    }

    #[test]
    fn id_is_kept_as_published() {
        let id = StationId::parse("  3255 ").unwrap();
        assert_eq!(id.as_str(), "  3255 ");
        assert_ne!(id, StationId::parse("3255").unwrap());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("519").unwrap();
        assert_eq!(id.to_string(), "519");
        assert_eq!(format!("{:?}", id), "StationId(519)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = StationId::parse("519").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"519\"");
    }

    #[test]
    fn error_display() {
        let err = StationId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid station id: must not be empty");
    }
}
