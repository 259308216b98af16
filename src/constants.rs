//! Constants for the CoinDash market-data SDK
//!
//! All fixed configuration for the fetch layer is centralized here.
//! Anything a deployment must be able to change (API key, base URL,
//! retry budget) lives in [`crate::config::ApiConfig`] instead.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the CoinGecko demo API key
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Environment variable read by `ApiConfig::from_env`
pub const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// Default number of retries after the initial attempt
pub const DEFAULT_RETRIES: u32 = 2;

/// Fixed delay between retry attempts (in milliseconds, no backoff)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Per-request timeout for coin detail and history requests (in seconds)
pub const DETAIL_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Size of the market universe fetched to derive top gainers/losers
pub const MOVERS_UNIVERSE_SIZE: u32 = 250;

/// Default page size for the ranked market listing
pub const DEFAULT_ASSETS_LIMIT: u32 = 25;

/// Default number of rows for the exchange directory
pub const DEFAULT_EXCHANGES_PER_PAGE: u32 = 20;

/// Base price for synthetic history when no fallback snapshot exists
pub const SYNTHETIC_BASE_PRICE: f64 = 100.0;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coindash-sdk/0.1.0";
