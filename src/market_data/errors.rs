//! Error types for the remote price provider
//!
//! Every failure talking to the provider is reported as a `FetchError`; a
//! missing or empty response never travels through the code as an absent
//! value.

use thiserror::Error;

/// Errors raised while fetching historical prices
#[derive(Debug, Error)]
pub enum FetchError {
    /// Ticker or day count rejected before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, TLS, timeout or body read failure
    #[error("Request for {ticker} failed: {source}")]
    Transport {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("Provider returned HTTP {status} for {ticker}: {body}")]
    Status {
        ticker: String,
        status: u16,
        body: String,
    },

    /// Response body is not JSON
    #[error("Response for {ticker} is not valid JSON: {reason}")]
    Decode { ticker: String, reason: String },

    /// Response JSON has no `historical` array
    #[error("Response for {ticker} has no historical records")]
    MissingHistorical { ticker: String },
}

impl FetchError {
    /// Returns true when the caller, not the provider, is at fault
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, FetchError::InvalidRequest(_))
    }
}

/// Errors raised while reading records out of a `PriceRecordSet`
#[derive(Debug, Error, PartialEq)]
pub enum RecordSetError {
    #[error("no historical array in response")]
    MissingHistorical,

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
