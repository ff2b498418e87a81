//! Station operating categories and their display metadata.

use std::fmt;

use serde::Serialize;

use super::StationStatus;

/// Stations with fewer bikes than this (but at least one) are running low.
pub const LOW_BIKE_THRESHOLD: u32 = 5;

/// The operating category of a station, derived from its live status.
///
/// Each category carries the static metadata the map needs to draw it:
/// a layer key, a human-readable label, a Font Awesome glyph, a marker
/// color and a legend color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationCategory {
    ComingSoon,
    Empty,
    OutOfOrder,
    Low,
    Healthy,
}

impl StationCategory {
    /// All categories, in legend order.
    pub const ALL: [StationCategory; 5] = [
        StationCategory::ComingSoon,
        StationCategory::Empty,
        StationCategory::OutOfOrder,
        StationCategory::Low,
        StationCategory::Healthy,
    ];

    /// Classify a station status.
    ///
    /// The rules are checked in order and the first match wins. They overlap
    /// (an uninstalled station usually also has no bikes), so the order is
    /// part of the contract:
    ///
    /// 1. not installed → `ComingSoon`
    /// 2. no bikes → `Empty`
    /// 3. not renting → `OutOfOrder`
    /// 4. fewer than [`LOW_BIKE_THRESHOLD`] bikes → `Low`
    /// 5. otherwise → `Healthy`
    pub fn from_status(status: &StationStatus) -> Self {
        if !status.is_installed {
            StationCategory::ComingSoon
        } else if status.num_bikes_available == 0 {
            StationCategory::Empty
        } else if !status.is_renting {
            StationCategory::OutOfOrder
        } else if status.num_bikes_available < LOW_BIKE_THRESHOLD {
            StationCategory::Low
        } else {
            StationCategory::Healthy
        }
    }

    /// Key of the map layer holding this category's markers.
    pub fn layer_key(self) -> &'static str {
        match self {
            StationCategory::ComingSoon => "comingSoon",
            StationCategory::Empty => "emptyStations",
            StationCategory::OutOfOrder => "outOfOrder",
            StationCategory::Low => "lowStations",
            StationCategory::Healthy => "healthyStations",
        }
    }

    /// Label shown in the layer control and legend.
    pub fn label(self) -> &'static str {
        match self {
            StationCategory::ComingSoon => "Coming Soon",
            StationCategory::Empty => "Empty Stations",
            StationCategory::OutOfOrder => "Out of Order",
            StationCategory::Low => "Low Stations",
            StationCategory::Healthy => "Healthy Stations",
        }
    }

    /// Font Awesome glyph drawn inside the marker.
    pub fn glyph(self) -> &'static str {
        match self {
            StationCategory::ComingSoon => "fa-coffee",
            StationCategory::Empty => "fa-times",
            StationCategory::OutOfOrder => "fa-ban",
            StationCategory::Low => "fa-exclamation",
            StationCategory::Healthy => "fa-thumbs-up",
        }
    }

    /// ExtraMarkers color name for the marker body.
    pub fn marker_color(self) -> &'static str {
        match self {
            StationCategory::ComingSoon => "red",
            StationCategory::Empty => "orange",
            StationCategory::OutOfOrder => "yellow",
            StationCategory::Low => "green",
            StationCategory::Healthy => "blue",
        }
    }

    /// CSS color of the legend swatch.
    pub fn legend_color(self) -> &'static str {
        match self {
            StationCategory::ComingSoon => "#ff0000",
            StationCategory::Empty => "#ff7800",
            StationCategory::OutOfOrder => "#ffff00",
            StationCategory::Low => "#00ff00",
            StationCategory::Healthy => "#0000ff",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of stations in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; 5]);

impl CategoryCounts {
    /// Tally a sequence of categories.
    pub fn tally(categories: impl IntoIterator<Item = StationCategory>) -> Self {
        let mut counts = Self::default();
        for category in categories {
            counts.0[category.index()] += 1;
        }
        counts
    }

    /// Count for one category.
    pub fn get(&self, category: StationCategory) -> usize {
        self.0[category.index()]
    }

    /// Total across all categories.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(category, count)` pairs in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (StationCategory, usize)> + '_ {
        StationCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}
