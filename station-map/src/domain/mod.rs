//! Domain types for the station status map.
//!
//! These types represent validated feed data. Raw feed records are converted
//! into them at the edge (see [`crate::gbfs`]), so code that receives them can
//! trust that required fields are present and well-typed.

mod category;
mod station;

pub use category::{CategoryCounts, LOW_BIKE_THRESHOLD, StationCategory};
pub use station::{InvalidStationId, StationId, StationInfo, StationStatus};
