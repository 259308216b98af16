//! # CoinDash market-data SDK
//!
//! The data-fetching layer of the CoinDash cryptocurrency dashboard:
//! ranked market listings, single-coin details, historical chart
//! series, trending coins, the global market summary and the exchange
//! directory, all sourced from the CoinGecko REST API.
//!
//! Every fetch method returns a [`FetchEnvelope`] stamped with the
//! production time. Failed requests are retried on a fixed budget;
//! coin details and chart history additionally carry a fallback policy
//! (static snapshot, synthetic series) so the detail page can render
//! even when the upstream is down — always flagged via
//! `is_using_fallback_data` so the UI can disclose it.
//!
//! The crate holds no cache and runs no background tasks; polling,
//! caching and request de-duplication belong to the caller.
//!
//! ## Usage
//!
//! ```no_run
//! use coindash_sdk::{ApiConfig, DashboardClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DashboardClient::new(ApiConfig::new("CG-your-key"))?;
//!
//! let listing = client.fetch_assets(25).await?;
//! for coin in &listing.data {
//!     println!("{}: ${:.2}", coin.name, coin.current_price);
//! }
//!
//! // Never fails: substitutes a flagged synthetic series when the
//! // upstream cannot be reached.
//! let history = client.fetch_asset_history("bitcoin", "week").await?;
//! if history.is_using_fallback_data {
//!     println!("showing placeholder chart data");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod time_range;
pub mod types;

// Re-export commonly used types
pub use client::DashboardClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use time_range::{TimeRangeSpec, TIME_RANGES};
pub use types::{
    CoinDetails, CoinMarket, Exchange, FetchEnvelope, GlobalData, MarketChart, TrendingData,
};
