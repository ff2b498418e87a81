//! Feed error types.

use super::FeedKind;

/// Errors that can occur when fetching or decoding a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Publisher returned an error status
    #[error("{feed} feed returned {status}: {message}")]
    Api {
        feed: FeedKind,
        status: u16,
        message: String,
    },

    /// Response body is not a GBFS station feed
    #[error("{feed} feed is not valid GBFS JSON: {message}")]
    Json { feed: FeedKind, message: String },

    /// Reading a local feed file failed
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
