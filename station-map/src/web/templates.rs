//! Askama templates for the web frontend.

use askama::Template;
use chrono::{DateTime, Utc};

use super::dto::MapPayload;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The station map.
#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {
    /// Renderer payload as JSON, safe to embed in a `<script>` element.
    pub payload_json: String,
    pub legend: Vec<LegendEntry>,
    pub station_count: usize,
    pub status_updated: Option<String>,
    pub rejected_records: usize,
}

impl MapTemplate {
    /// Build the page for a payload.
    pub fn new(payload: &MapPayload) -> Result<Self, serde_json::Error> {
        let legend = payload
            .categories
            .iter()
            .map(|c| LegendEntry {
                label: c.label,
                color: c.legend_color,
                count: c.count,
            })
            .collect();

        Ok(Self {
            payload_json: script_safe_json(payload)?,
            legend,
            station_count: payload.stations.len(),
            status_updated: payload.status_updated.map(format_timestamp),
            rejected_records: payload.rejected_records,
        })
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One row of the map legend.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

/// Serialize to JSON that cannot close the `<script>` element it sits in.
///
/// `<` only occurs inside JSON strings, where `\u003c` is an equivalent escape.
fn script_safe_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
