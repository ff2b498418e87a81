//! Server configuration.
//!
//! Everything has a default that points at the Citi Bike feeds and centers
//! the map on New York City. Each setting can be overridden by an
//! environment variable (a `.env` file is honored by `main`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheConfig;
use crate::gbfs::FeedConfig;

/// OpenStreetMap tile URL template.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile servers.
pub const DEFAULT_TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Longest accepted cache TTL (one day).
pub const MAX_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors in configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Initial view and tile source for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    /// Map center as `[lat, lon]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [40.73, -74.0059],
            zoom: 12,
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub feeds: FeedConfig,
    pub cache: CacheConfig,
    pub map: MapConfig,
    /// Serve feeds from this directory instead of the network.
    pub mock_feed_dir: Option<PathBuf>,
    /// Directory served at `/static`.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            feeds: FeedConfig::default(),
            cache: CacheConfig::default(),
            map: MapConfig::default(),
            mock_feed_dir: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset and empty variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = parse_var(&get, "STATION_MAP_ADDR")? {
            config.addr = addr;
        }

        if let Some(url) = get("STATION_INFO_URL") {
            config.feeds.information_url = url;
        }
        if let Some(url) = get("STATION_STATUS_URL") {
            config.feeds.status_url = url;
        }
        if let Some(secs) = parse_var::<u64>(&get, "FEED_TIMEOUT_SECS")? {
            config.feeds.timeout_secs = secs;
        }

        if let Some(ttl) = parse_ttl(&get, "FEED_CACHE_TTL_SECS")? {
            config.cache.status_ttl = ttl;
        }
        if let Some(ttl) = parse_ttl(&get, "INFO_CACHE_TTL_SECS")? {
            config.cache.information_ttl = ttl;
        }

        if let Some(lat) = parse_var::<f64>(&get, "MAP_CENTER_LAT")? {
            check_range("MAP_CENTER_LAT", lat, -90.0, 90.0)?;
            config.map.center[0] = lat;
        }
        if let Some(lon) = parse_var::<f64>(&get, "MAP_CENTER_LON")? {
            check_range("MAP_CENTER_LON", lon, -180.0, 180.0)?;
            config.map.center[1] = lon;
        }
        if let Some(zoom) = parse_var::<u8>(&get, "MAP_ZOOM")? {
            check_range("MAP_ZOOM", f64::from(zoom), 0.0, 20.0)?;
            config.map.zoom = zoom;
        }
        if let Some(url) = get("MAP_TILE_URL") {
            config.map.tile_url = url;
        }
        if let Some(attribution) = get("MAP_TILE_ATTRIBUTION") {
            config.map.tile_attribution = attribution;
        }

        config.mock_feed_dir = get("MOCK_FEED_DIR").map(PathBuf::from);
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

fn parse_ttl(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match parse_var::<u64>(get, var)? {
        Some(secs) if secs > MAX_CACHE_TTL_SECS => Err(ConfigError::Invalid {
            var,
            value: secs.to_string(),
            reason: format!("must be at most {MAX_CACHE_TTL_SECS} seconds"),
        }),
        secs => Ok(secs.map(Duration::from_secs)),
    }
}

fn check_range(var: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: format!("must be between {min} and {max}"),
        })
    }
}
