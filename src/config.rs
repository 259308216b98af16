//! Client configuration
//!
//! The API key is injected here rather than compiled into the crate.
//! Base URL and retry knobs are overridable so tests can point the
//! client at a mock server and shorten the retry delay.

use crate::constants::{
    API_KEY_ENV, COINGECKO_API_URL, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY_MS,
};
use std::time::Duration;

/// Configuration for [`crate::client::DashboardClient`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// CoinGecko demo API key, sent on every request
    pub api_key: String,
    /// Upstream base URL
    pub base_url: String,
    /// Number of retries after the initial attempt
    pub retries: u32,
    /// Fixed delay between attempts (no backoff)
    pub retry_delay: Duration,
}

impl ApiConfig {
    /// Creates a configuration with the given API key and defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: COINGECKO_API_URL.to_string(),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Reads the API key from the `COINGECKO_API_KEY` environment variable
    ///
    /// An unset variable yields an empty key; the demo API accepts
    /// unauthenticated requests at a lower rate limit.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).unwrap_or_default())
    }

    /// Overrides the upstream base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the retry budget
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Overrides the delay between retry attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}
