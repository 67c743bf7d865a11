//! CoinGecko Price Feed
//!
//! One best-effort GET against the simple-price endpoint with a short
//! timeout. Exactly one attempt: no retry, no backoff, no cache. Any
//! failure degrades to the hardcoded table, and the degrade is visible
//! to the caller through `PriceOrigin` instead of being swallowed.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{fallback_table, PriceFeed};
use crate::error::{Result, TraderError};
use crate::model::{Asset, PriceOrigin, PriceTable};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// (CoinGecko id, ticker, display name) for every tracked asset
const TRACKED: &[(&str, &str, &str)] = &[
    ("bitcoin", "BTC", "Bitcoin"),
    ("ethereum", "ETH", "Ethereum"),
    ("tether", "USDT", "Tether"),
    ("binancecoin", "BNB", "Binance Coin"),
    ("solana", "SOL", "Solana"),
    ("ripple", "XRP", "Ripple"),
    ("cardano", "ADA", "Cardano"),
    ("dogecoin", "DOGE", "Dogecoin"),
    ("matic-network", "MATIC", "Polygon"),
    ("shiba-inu", "SHIB", "Shiba Inu"),
    ("polkadot", "DOT", "Polkadot"),
];

/// One INR quote in the simple-price response
#[derive(Debug, Deserialize)]
struct Quote {
    inr: Decimal,
    #[serde(rename = "inr_24h_change")]
    change_24h: Decimal,
}

/// Live price feed backed by the CoinGecko simple-price API
pub struct CoinGeckoFeed {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CoinGeckoFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoFeed {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the feed at a different host (tests use a local mock)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The single live attempt. Errors here are the trigger for fallback,
    /// never surfaced to the user.
    async fn fetch_live(&self) -> Result<PriceTable> {
        let ids = TRACKED
            .iter()
            .map(|(id, _, _)| *id)
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/api/v3/simple/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", ids.as_str()),
                ("vs_currencies", "inr"),
                ("include_24hr_change", "true"),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let quotes: HashMap<String, Quote> = response.json().await?;

        // Ids absent from the response are simply dropped, as are quotes
        // without a positive price. Unit price must stay positive or a
        // later buy would divide by zero.
        let assets = TRACKED.iter().filter_map(|(id, symbol, name)| {
            let quote = quotes.get(*id)?;
            if quote.inr <= Decimal::ZERO {
                tracing::warn!(id = *id, price = %quote.inr, "dropping non-positive quote");
                return None;
            }
            Some(Asset::new(*symbol, *name, quote.inr).with_change(quote.change_24h))
        });
        let table = PriceTable::new(assets, PriceOrigin::Live);

        if table.is_empty() {
            return Err(TraderError::MalformedResponse(
                "no tracked assets in response".into(),
            ));
        }
        Ok(table)
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn fetch(&self) -> Result<PriceTable> {
        match self.fetch_live().await {
            Ok(table) => {
                tracing::info!(assets = table.len(), "live prices loaded");
                Ok(table)
            }
            Err(e) => {
                tracing::warn!(error = %e, "live price fetch failed, using fallback data");
                Ok(fallback_table())
            }
        }
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_live_fetch_maps_quotes_to_symbols() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("vs_currencies", "inr"))
            .and(query_param("include_24hr_change", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": { "inr": 3900000.0, "inr_24h_change": 1.5 },
                "cardano": { "inr": 44.2, "inr_24h_change": -2.8 },
            })))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Live);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("BTC").unwrap().price_inr, dec!(3900000));
        assert_eq!(table.get("ADA").unwrap().change_24h, dec!(-2.8));
        assert!(table.get("ETH").is_none());
    }

    #[tokio::test]
    async fn test_non_positive_quotes_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": { "inr": 0.0, "inr_24h_change": 1.5 },
                "ethereum": { "inr": -3.2, "inr_24h_change": 0.4 },
                "cardano": { "inr": 44.2, "inr_24h_change": -2.8 },
            })))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Live);
        assert_eq!(table.symbols(), vec!["ADA"]);
    }

    #[tokio::test]
    async fn test_all_quotes_non_positive_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": { "inr": 0.0, "inr_24h_change": 1.5 },
            })))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Fallback);
        assert_eq!(table.len(), 11);
    }

    #[tokio::test]
    async fn test_malformed_body_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_empty_body_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let feed = CoinGeckoFeed::with_base_url(server.uri());
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_fallback() {
        // Nothing listens here; the request fails at connect
        let feed = CoinGeckoFeed::with_base_url("http://127.0.0.1:9");
        let table = feed.fetch().await.unwrap();

        assert_eq!(table.origin, PriceOrigin::Fallback);
    }
}
