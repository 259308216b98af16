//! Fallback data for when the upstream API cannot be reached
//!
//! Two substitution mechanisms live here: a static, hand-authored
//! snapshot per supported coin id (served when a detail fetch fails),
//! and a synthetic random-walk series generator (served when a history
//! fetch fails). Everything produced here is flagged with
//! `is_using_fallback_data` by the caller so the UI can disclose that
//! it is not real market data.

use crate::constants::SYNTHETIC_BASE_PRICE;
use crate::types::{CoinDetails, CoinImage, CoinLinks, MarketChart, MarketData, ReposUrl};
use chrono::Utc;
use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashMap;

lazy_static! {
    /// Static snapshots keyed by coin id, built once at first use
    static ref FALLBACK_COINS: HashMap<&'static str, CoinDetails> = {
        let mut coins = HashMap::new();
        coins.insert("sui", sui_snapshot());
        coins
    };
}

/// Returns the static snapshot for a coin id, if one is registered
pub fn coin_snapshot(id: &str) -> Option<&'static CoinDetails> {
    FALLBACK_COINS.get(id)
}

/// Generates a plausible-looking but entirely fictitious chart series
///
/// Produces `days * 24` points evenly spaced across the requested span
/// ending now. Each step applies an independent uniform multiplicative
/// perturbation: price within ±2%, market cap ±1%, volume ±2.5%,
/// compounding from `base_price`, `base_price * 10^7` and
/// `base_price * 10^6` respectively.
pub fn synthetic_market_chart(days: u32, base_price: f64) -> MarketChart {
    let num_points = (days * 24) as usize;
    let now = Utc::now().timestamp_millis();
    let span_ms = days as i64 * 24 * 60 * 60 * 1000;
    let step_ms = span_ms / num_points as i64;

    let mut rng = rand::thread_rng();
    let mut price = base_price;
    let mut market_cap = base_price * 10_000_000.0;
    let mut volume = base_price * 1_000_000.0;

    let mut prices = Vec::with_capacity(num_points);
    let mut market_caps = Vec::with_capacity(num_points);
    let mut total_volumes = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let timestamp = (now - (num_points - i) as i64 * step_ms) as f64;

        price += price * rng.gen_range(-0.02..0.02);
        prices.push([timestamp, price]);

        market_cap += market_cap * rng.gen_range(-0.01..0.01);
        market_caps.push([timestamp, market_cap]);

        volume += volume * rng.gen_range(-0.025..0.025);
        total_volumes.push([timestamp, volume]);
    }

    MarketChart {
        prices,
        market_caps,
        total_volumes,
    }
}

/// Base price for a synthetic series for the given coin id
///
/// Derived from the snapshot's USD price when one exists, scaled into
/// a chart-friendly magnitude, otherwise a fixed constant.
pub fn synthetic_base_price(id: &str) -> f64 {
    coin_snapshot(id)
        .and_then(|coin| coin.market_data.current_price.get("usd"))
        .map(|usd| usd * 100.0)
        .unwrap_or(SYNTHETIC_BASE_PRICE)
}

fn usd_map(value: f64) -> HashMap<String, f64> {
    HashMap::from([("usd".to_string(), value)])
}

fn sui_snapshot() -> CoinDetails {
    CoinDetails {
        id: "sui".to_string(),
        symbol: "sui".to_string(),
        name: "Sui".to_string(),
        image: CoinImage {
            thumb: "https://assets.coingecko.com/coins/images/26375/thumb/sui_asset.jpeg?1696525432"
                .to_string(),
            small: "https://assets.coingecko.com/coins/images/26375/small/sui_asset.jpeg?1696525432"
                .to_string(),
            large: "https://assets.coingecko.com/coins/images/26375/large/sui_asset.jpeg?1696525432"
                .to_string(),
        },
        market_data: MarketData {
            current_price: HashMap::from([
                ("usd".to_string(), 0.67),
                ("btc".to_string(), 0.0000081),
            ]),
            market_cap: usd_map(860_000_000.0),
            total_volume: usd_map(107_000_000.0),
            price_change_percentage_24h: Some(2.5),
            price_change_percentage_7d: Some(5.2),
            price_change_percentage_30d: Some(-3.1),
            circulating_supply: Some(1_280_000_000.0),
            total_supply: Some(10_000_000_000.0),
            max_supply: Some(10_000_000_000.0),
            ath: usd_map(1.85),
            ath_change_percentage: usd_map(-63.5),
            ath_date: HashMap::from([(
                "usd".to_string(),
                "2024-01-15T00:00:00.000Z".to_string(),
            )]),
            atl: usd_map(0.34),
            atl_change_percentage: usd_map(97.6),
            atl_date: HashMap::from([(
                "usd".to_string(),
                "2023-06-10T00:00:00.000Z".to_string(),
            )]),
            fully_diluted_valuation: usd_map(6_700_000_000.0),
        },
        description: HashMap::from([(
            "en".to_string(),
            "Sui is a layer-1 blockchain designed for high throughput and low latency. \
             It uses a novel object-centric model with parallel transaction execution \
             for high scalability. The SUI token is used for gas fees, staking, and \
             governance."
                .to_string(),
        )]),
        links: Some(CoinLinks {
            homepage: vec!["https://sui.io/".to_string()],
            blockchain_site: vec!["https://explorer.sui.io/".to_string()],
            official_forum_url: vec!["https://forums.sui.io/".to_string()],
            chat_url: vec!["https://discord.com/invite/sui".to_string()],
            announcement_url: vec!["https://blog.sui.io/".to_string()],
            twitter_screen_name: Some("SuiNetwork".to_string()),
            telegram_channel_identifier: Some("SuiNetwork".to_string()),
            subreddit_url: None,
            repos_url: Some(ReposUrl {
                github: vec!["https://github.com/MystenLabs/sui".to_string()],
                bitbucket: vec![],
            }),
        }),
        market_cap_rank: Some(55),
        categories: vec![
            "Layer 1".to_string(),
            "Smart Contract Platform".to_string(),
        ],
    }
}
