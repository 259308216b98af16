//! Error types for the CoinDash market-data SDK

use thiserror::Error;

/// Errors that can occur when fetching data from the upstream API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream returned a non-success HTTP status
    #[error("API request failed with status {status}")]
    Status { status: u16 },

    /// Response body could not be decoded as the expected JSON shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Caller passed a time range that is not in the time-range table
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    /// Request could not be constructed or cloned for a retry attempt
    #[error("Request error: {0}")]
    Request(String),
}

impl ApiError {
    /// Returns the HTTP status code if this is a status error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for failures that never reach the network (local validation)
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::InvalidTimeRange(_) | ApiError::Request(_))
    }
}
