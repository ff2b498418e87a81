//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFeeds;
use crate::config::MapConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached feed source
    pub feeds: Arc<CachedFeeds>,

    /// Map view handed to the renderer
    pub map: Arc<MapConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feeds: CachedFeeds, map: MapConfig) -> Self {
        Self {
            feeds: Arc::new(feeds),
            map: Arc::new(map),
        }
    }
}
