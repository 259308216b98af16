//! Dashboard API client
//!
//! One method per dashboard resource, each composing the same three
//! pieces: build the request, run it through [`fetch_with_retry`],
//! decode it with [`handle_response`], and wrap the result in a
//! [`FetchEnvelope`] stamped with the production time. The two
//! detail-oriented methods (`fetch_asset`, `fetch_asset_history`)
//! additionally carry a fallback policy; everything else propagates
//! failures to the caller.
//!
//! The client holds no cache and performs no request coalescing: two
//! concurrent calls for the same resource perform two upstream
//! requests. Polling and caching belong to the layers above.

use crate::{
    config::ApiConfig,
    constants::{API_KEY_HEADER, DETAIL_REQUEST_TIMEOUT_SECS, MOVERS_UNIVERSE_SIZE, USER_AGENT},
    error::ApiError,
    fallback,
    time_range,
    types::{
        CoinDetails, CoinMarket, Exchange, FetchEnvelope, GlobalData, MarketChart, TrendingData,
    },
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

/// Async client for the CoinGecko-backed dashboard resources
///
/// Cheap to clone; all methods take `&self` and may be invoked
/// concurrently from independent tasks.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    config: ApiConfig,
}

impl DashboardClient {
    /// Creates a client from the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// Creates a client configured from the environment
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env())
    }

    /// Fetches the ranked market listing
    pub async fn fetch_assets(
        &self,
        limit: u32,
    ) -> Result<FetchEnvelope<Vec<CoinMarket>>, ApiError> {
        tracing::debug!(limit, "Fetching market listing");

        let per_page = limit.to_string();
        let request = self
            .client
            .get(format!("{}/coins/markets", self.config.base_url))
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("locale", "en"),
            ])
            .header(API_KEY_HEADER, &self.config.api_key);

        let response = self.fetch_with_retry(request).await?;
        let data = handle_response(response).await?;
        Ok(FetchEnvelope::live(data))
    }

    /// Fetches the coins with the largest 24h gains
    ///
    /// Derived client-side from a single 250-row market listing rather
    /// than a second upstream endpoint; [`fetch_top_losers`] draws from
    /// the same universe.
    ///
    /// [`fetch_top_losers`]: DashboardClient::fetch_top_losers
    pub async fn fetch_top_gainers(
        &self,
        limit: usize,
    ) -> Result<FetchEnvelope<Vec<CoinMarket>>, ApiError> {
        let universe = self.fetch_assets(MOVERS_UNIVERSE_SIZE).await?;
        let mut coins = universe.data;
        coins.sort_by(|a, b| change_24h(b).total_cmp(&change_24h(a)));
        coins.truncate(limit);
        Ok(FetchEnvelope::live(coins))
    }

    /// Fetches the coins with the largest 24h losses
    pub async fn fetch_top_losers(
        &self,
        limit: usize,
    ) -> Result<FetchEnvelope<Vec<CoinMarket>>, ApiError> {
        let universe = self.fetch_assets(MOVERS_UNIVERSE_SIZE).await?;
        let mut coins = universe.data;
        coins.sort_by(|a, b| change_24h(a).total_cmp(&change_24h(b)));
        coins.truncate(limit);
        Ok(FetchEnvelope::live(coins))
    }

    /// Fetches the trending-search coin list
    pub async fn fetch_trending(&self) -> Result<FetchEnvelope<TrendingData>, ApiError> {
        tracing::debug!("Fetching trending coins");

        let request = self
            .client
            .get(format!("{}/search/trending", self.config.base_url))
            .header(API_KEY_HEADER, &self.config.api_key);

        let response = self.fetch_with_retry(request).await?;
        let data = handle_response(response).await?;
        Ok(FetchEnvelope::live(data))
    }

    /// Fetches the global market summary
    pub async fn fetch_global(&self) -> Result<FetchEnvelope<GlobalData>, ApiError> {
        tracing::debug!("Fetching global market data");

        let request = self
            .client
            .get(format!("{}/global", self.config.base_url))
            .header(API_KEY_HEADER, &self.config.api_key);

        let response = self.fetch_with_retry(request).await?;
        let data = handle_response(response).await?;
        Ok(FetchEnvelope::live(data))
    }

    /// Fetches the exchange directory
    pub async fn fetch_exchanges(
        &self,
        per_page: u32,
    ) -> Result<FetchEnvelope<Vec<Exchange>>, ApiError> {
        tracing::debug!(per_page, "Fetching exchange directory");

        let per_page = per_page.to_string();
        let request = self
            .client
            .get(format!("{}/exchanges", self.config.base_url))
            .query(&[("per_page", per_page.as_str())])
            .header(API_KEY_HEADER, &self.config.api_key);

        let response = self.fetch_with_retry(request).await?;
        let data = handle_response(response).await?;
        Ok(FetchEnvelope::live(data))
    }

    /// Fetches full details for a single coin
    ///
    /// When the upstream call fails after retries and a static snapshot
    /// is registered for `id`, the snapshot is returned flagged as
    /// fallback data; without a snapshot the failure propagates.
    pub async fn fetch_asset(&self, id: &str) -> Result<FetchEnvelope<CoinDetails>, ApiError> {
        tracing::debug!(id, "Fetching coin details");

        let request = self
            .client
            .get(format!("{}/coins/{}", self.config.base_url, id))
            .query(&[
                ("localization", "false"),
                ("tickers", "false"),
                ("market_data", "true"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ])
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(Duration::from_secs(DETAIL_REQUEST_TIMEOUT_SECS));

        let result = match self.fetch_with_retry(request).await {
            Ok(response) => handle_response(response).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(data) => Ok(FetchEnvelope::live(data)),
            Err(err) => match fallback::coin_snapshot(id) {
                Some(snapshot) => {
                    tracing::warn!(id, error = %err, "Coin detail fetch failed, serving static snapshot");
                    Ok(FetchEnvelope::fallback(snapshot.clone()))
                }
                None => {
                    tracing::warn!(id, error = %err, "Coin detail fetch failed, no snapshot registered");
                    Err(err)
                }
            },
        }
    }

    /// Fetches the historical chart series for a coin
    ///
    /// `time_range` must be one of the `value` identifiers in
    /// [`crate::time_range::TIME_RANGES`]; an unrecognized value fails
    /// before any network call. Upstream failure never propagates from
    /// this method: a synthetic series is generated instead, flagged as
    /// fallback data.
    pub async fn fetch_asset_history(
        &self,
        id: &str,
        time_range: &str,
    ) -> Result<FetchEnvelope<MarketChart>, ApiError> {
        let range = time_range::find(time_range)
            .ok_or_else(|| ApiError::InvalidTimeRange(time_range.to_string()))?;

        tracing::debug!(id, time_range, days = range.days, "Fetching coin history");

        let days = range.days.to_string();
        let request = self
            .client
            .get(format!(
                "{}/coins/{}/market_chart",
                self.config.base_url, id
            ))
            .query(&[("vs_currency", "usd"), ("days", days.as_str())])
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(Duration::from_secs(DETAIL_REQUEST_TIMEOUT_SECS));

        let result = match self.fetch_with_retry(request).await {
            Ok(response) => handle_response(response).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(data) => Ok(FetchEnvelope::live(data)),
            Err(err) => {
                tracing::warn!(id, time_range, error = %err, "History fetch failed, generating synthetic series");
                let chart =
                    fallback::synthetic_market_chart(range.days, fallback::synthetic_base_price(id));
                Ok(FetchEnvelope::fallback(chart))
            }
        }
    }

    /// Sends a request, retrying on any failure with a fixed delay
    ///
    /// A transport error and a non-success HTTP status both consume one
    /// retry unit; with a budget of `r` the request is attempted at most
    /// `r + 1` times, then the last failure propagates.
    async fn fetch_with_retry(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let mut retries = self.config.retries;
        loop {
            let attempt = request.try_clone().ok_or_else(|| {
                ApiError::Request("request cannot be cloned for retry".to_string())
            })?;

            let failure = match attempt.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => ApiError::Status {
                    status: response.status().as_u16(),
                },
                Err(err) => ApiError::Network(err),
            };

            if retries == 0 {
                return Err(failure);
            }
            tracing::debug!(error = %failure, retries_left = retries, "Request failed, retrying");
            sleep(self.config.retry_delay).await;
            retries -= 1;
        }
    }
}

/// Decodes a completed response, surfacing a uniform error on failure
///
/// A non-success status reads the body as text for diagnostics; a body
/// that does not decode as `T` surfaces as [`ApiError::Decode`] and is
/// never retried.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), body = %body, "API error response");
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|err| ApiError::Decode(format!("failed to parse response: {err}")))
}

fn change_24h(coin: &CoinMarket) -> f64 {
    coin.price_change_percentage_24h.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn market_row(id: &str, change_24h: f64) -> serde_json::Value {
        json!({
            "id": id,
            "symbol": id,
            "name": id,
            "image": format!("https://example.com/{id}.png"),
            "current_price": 10.0,
            "market_cap": 1.0e9,
            "market_cap_rank": 1,
            "price_change_percentage_24h": change_24h,
        })
    }

    fn client_for(server: &MockServer) -> DashboardClient {
        let config = ApiConfig::new("test-key")
            .with_base_url(server.uri())
            .with_retry_delay(Duration::from_millis(10));
        DashboardClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn fetch_assets_decodes_listing_and_stamps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("order", "market_cap_desc"))
            .and(query_param("per_page", "25"))
            .and(header(API_KEY_HEADER, "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([market_row("bitcoin", 1.2), market_row("ethereum", -0.4)])),
            )
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_assets(25).await.unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].id, "bitcoin");
        assert!(!envelope.is_using_fallback_data);

        let now = Utc::now().timestamp_millis();
        assert!((now - envelope.timestamp).abs() < 5_000);
    }

    #[tokio::test]
    async fn retry_recovers_when_budget_suffices() {
        let server = MockServer::start().await;
        // First two attempts fail, third succeeds; budget of 2 retries
        // means 3 total attempts.
        Mock::given(method("GET"))
            .and(path("/search/trending"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search/trending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "coins": [] })))
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_trending().await.unwrap();
        assert!(envelope.data.coins.is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn retry_budget_exhaustion_propagates_last_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/trending"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_trending().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500 }));
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn decode_failure_surfaces_after_successful_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/trending"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_trending().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        // The transport succeeded, so no retry happened.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gainers_and_losers_derive_from_the_same_universe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("per_page", "250"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                market_row("mid", 5.0),
                market_row("down", -3.0),
                market_row("up", 10.0),
                market_row("flat", 1.0),
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let gainers = client.fetch_top_gainers(2).await.unwrap().data;
        let ids: Vec<&str> = gainers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["up", "mid"]);

        let losers = client.fetch_top_losers(2).await.unwrap().data;
        let ids: Vec<&str> = losers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["down", "flat"]);
    }

    #[tokio::test]
    async fn gainers_return_fewer_items_when_universe_is_smaller() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([market_row("only", 2.0)])),
            )
            .mount(&server)
            .await;

        let gainers = client_for(&server).fetch_top_gainers(10).await.unwrap().data;
        assert_eq!(gainers.len(), 1);
    }

    #[tokio::test]
    async fn fetch_asset_returns_live_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/sui"))
            .and(query_param("market_data", "true"))
            .and(query_param("localization", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sui",
                "symbol": "sui",
                "name": "Sui",
                "image": {
                    "thumb": "https://example.com/t.png",
                    "small": "https://example.com/s.png",
                    "large": "https://example.com/l.png"
                },
                "market_data": { "current_price": { "usd": 0.91 } }
            })))
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_asset("sui").await.unwrap();
        assert!(!envelope.is_using_fallback_data);
        assert_eq!(envelope.data.market_data.current_price["usd"], 0.91);
    }

    #[tokio::test]
    async fn fetch_asset_serves_snapshot_when_upstream_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_asset("sui").await.unwrap();
        assert!(envelope.is_using_fallback_data);
        assert_eq!(envelope.data.name, "Sui");
        assert_eq!(envelope.data.symbol, "sui");
        assert_eq!(envelope.data.market_data.current_price["usd"], 0.67);
    }

    #[tokio::test]
    async fn fetch_asset_propagates_when_no_snapshot_exists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_asset("not-a-real-coin")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn fetch_asset_history_returns_live_chart() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/sui/market_chart"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [[1700000000000i64, 0.67]],
                "market_caps": [[1700000000000i64, 8.6e8]],
                "total_volumes": [[1700000000000i64, 1.07e8]]
            })))
            .mount(&server)
            .await;

        let envelope = client_for(&server)
            .fetch_asset_history("sui", "week")
            .await
            .unwrap();
        assert!(!envelope.is_using_fallback_data);
        assert_eq!(envelope.data.prices.len(), 1);
    }

    #[tokio::test]
    async fn fetch_asset_history_falls_back_to_synthetic_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let envelope = client_for(&server)
            .fetch_asset_history("sui", "hour")
            .await
            .unwrap();
        assert!(envelope.is_using_fallback_data);
        assert_eq!(envelope.data.prices.len(), 24);
        assert_eq!(envelope.data.market_caps.len(), 24);
        assert_eq!(envelope.data.total_volumes.len(), 24);
    }

    #[tokio::test]
    async fn fetch_asset_history_rejects_unknown_range_before_any_request() {
        let server = MockServer::start().await;

        let err = client_for(&server)
            .fetch_asset_history("sui", "not-a-real-range")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidTimeRange(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_global_decodes_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/global"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "active_cryptocurrencies": 13500,
                    "markets": 1050,
                    "total_market_cap": { "usd": 2.4e12 },
                    "total_volume": { "usd": 9.1e10 },
                    "market_cap_percentage": { "btc": 52.1, "eth": 17.3 },
                    "market_cap_change_percentage_24h_usd": -0.8,
                    "updated_at": 1700000000
                }
            })))
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_global().await.unwrap();
        assert_eq!(envelope.data.data.active_cryptocurrencies, Some(13500));
        assert_eq!(envelope.data.data.market_cap_percentage["btc"], 52.1);
    }

    #[tokio::test]
    async fn fetch_exchanges_decodes_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchanges"))
            .and(query_param("per_page", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "binance",
                "name": "Binance",
                "year_established": 2017,
                "country": "Cayman Islands",
                "trust_score": 10,
                "trust_score_rank": 1,
                "trade_volume_24h_btc": 250000.0,
                "trade_volume_24h_btc_normalized": 180000.0
            }])))
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_exchanges(20).await.unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].id, "binance");
        assert_eq!(envelope.data[0].trust_score, Some(10));
    }
}
