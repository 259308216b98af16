//! Data model for the CoinDash market-data SDK
//!
//! Response shapes mirror the upstream CoinGecko payloads. Fields the
//! upstream can omit or null out are `Option`s; map-valued fields
//! (price by currency, etc.) default to empty so partial payloads still
//! decode. No validation happens beyond decoding — callers consume what
//! the upstream sent.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wrapper returned by every fetch method
///
/// `timestamp` is the epoch-millisecond instant the envelope was
/// produced, not an upstream field. `is_using_fallback_data` is `true`
/// exactly when `data` did not come from the live upstream call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchEnvelope<T> {
    pub data: T,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_using_fallback_data: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl<T> FetchEnvelope<T> {
    /// Wraps data obtained from the live upstream call
    pub fn live(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
            is_using_fallback_data: false,
        }
    }

    /// Wraps locally substituted data, flagged so the UI can disclose it
    pub fn fallback(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
            is_using_fallback_data: true,
        }
    }
}

/// One row of the ranked market listing (`/coins/markets`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<String>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<String>,
    pub roi: Option<Roi>,
    pub last_updated: Option<String>,
}

/// Return-on-investment block attached to some listing rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roi {
    pub times: f64,
    pub currency: String,
    pub percentage: f64,
}

/// Full coin-detail payload (`/coins/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetails {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: CoinImage,
    pub market_data: MarketData,
    #[serde(default)]
    pub description: HashMap<String, String>,
    pub links: Option<CoinLinks>,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinImage {
    pub thumb: String,
    pub small: String,
    pub large: String,
}

/// Market data block of a coin-detail payload
///
/// Price, cap, volume and ath/atl figures are maps keyed by currency
/// (`"usd"`, `"btc"`, ...), exactly as the upstream sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: HashMap<String, f64>,
    #[serde(default)]
    pub ath_change_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub ath_date: HashMap<String, String>,
    #[serde(default)]
    pub atl: HashMap<String, f64>,
    #[serde(default)]
    pub atl_change_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub atl_date: HashMap<String, String>,
    #[serde(default)]
    pub fully_diluted_valuation: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub blockchain_site: Vec<String>,
    #[serde(default)]
    pub official_forum_url: Vec<String>,
    #[serde(default)]
    pub chat_url: Vec<String>,
    #[serde(default)]
    pub announcement_url: Vec<String>,
    pub twitter_screen_name: Option<String>,
    pub telegram_channel_identifier: Option<String>,
    pub subreddit_url: Option<String>,
    pub repos_url: Option<ReposUrl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReposUrl {
    #[serde(default)]
    pub github: Vec<String>,
    #[serde(default)]
    pub bitbucket: Vec<String>,
}

/// Historical chart triple (`/coins/{id}/market_chart`)
///
/// Each series is a list of `[timestamp-millis, value]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<[f64; 2]>,
    pub market_caps: Vec<[f64; 2]>,
    pub total_volumes: Vec<[f64; 2]>,
}

/// Trending search payload (`/search/trending`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingData {
    #[serde(default)]
    pub coins: Vec<TrendingItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingItem {
    pub item: TrendingCoin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub coin_id: Option<u64>,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
    pub slug: Option<String>,
    pub price_btc: Option<f64>,
    pub score: Option<i64>,
}

/// Global market summary (`/global`)
///
/// The upstream nests everything under a `data` key; that wrapper is
/// kept so the payload round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalData {
    pub data: GlobalMarketSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalMarketSummary {
    pub active_cryptocurrencies: Option<u64>,
    pub upcoming_icos: Option<u64>,
    pub ongoing_icos: Option<u64>,
    pub ended_icos: Option<u64>,
    pub markets: Option<u64>,
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    pub updated_at: Option<i64>,
}

/// One row of the exchange directory (`/exchanges`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: String,
    pub name: String,
    pub year_established: Option<u32>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub trust_score: Option<u32>,
    pub trust_score_rank: Option<u32>,
    pub trade_volume_24h_btc: Option<f64>,
    pub trade_volume_24h_btc_normalized: Option<f64>,
}
