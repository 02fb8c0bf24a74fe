//! Error types for fetching feeds and loading configuration

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while retrieving or parsing a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("Feed {url} returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Endpoint that was requested
        url: String,
    },

    /// Body was neither RSS nor Atom
    #[error("Could not parse feed {url}: {reason}")]
    Parse {
        /// Endpoint that was requested
        url: String,
        /// Parser message
        reason: String,
    },
}

impl FeedError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Request(e) => e.is_timeout() || e.is_connect(),
            FeedError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            FeedError::Parse { .. } => false,
        }
    }
}

/// Errors raised while assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable present but not parseable
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sources file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source '{0}' is defined more than once")]
    DuplicateSource(String),

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    #[error("Invalid endpoint for source '{name}': {source}")]
    InvalidEndpoint {
        name: String,
        #[source]
        source: url::ParseError,
    },
}
