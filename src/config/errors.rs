//! Configuration error types
//!
//! Raised while reading environment settings at startup and while loading the
//! bundled ticker list at the beginning of every ingestion run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The ticker list file could not be opened or read
    #[error("Ticker list {path} is unreadable: {source}")]
    TickerListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ticker list file was read but its content is not a valid list
    #[error("Ticker list {path} is malformed: {reason}")]
    TickerListMalformed { path: PathBuf, reason: String },

    /// An environment variable holds a value that cannot be parsed
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The outbound HTTP client could not be built from the settings
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}
