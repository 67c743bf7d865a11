//! Price Acquisition
//!
//! Abstractions and implementations for acquiring a quote table.

mod coingecko;

pub use coingecko::CoinGeckoFeed;

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::model::{Asset, PriceOrigin, PriceTable};

/// Price feed trait (Strategy pattern)
///
/// Implement this per source: CoinGecko, a static table, a test double.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Acquire a complete quote table. Implementations that degrade to
    /// fallback data report it through the table's `origin` rather than
    /// an error.
    async fn fetch(&self) -> Result<PriceTable>;

    /// Feed name for logs
    fn name(&self) -> &str;
}

/// The hardcoded quote table used when no live data is available
pub fn fallback_table() -> PriceTable {
    let assets = [
        Asset::new("BTC", "Bitcoin", dec!(3842000)).with_change(dec!(2.4)),
        Asset::new("ETH", "Ethereum", dec!(218000)).with_change(dec!(1.8)),
        Asset::new("USDT", "Tether", dec!(83.42)).with_change(dec!(0.1)),
        Asset::new("BNB", "Binance Coin", dec!(31200)).with_change(dec!(0.8)),
        Asset::new("SOL", "Solana", dec!(5842)).with_change(dec!(4.1)),
        Asset::new("XRP", "Ripple", dec!(52.30)).with_change(dec!(0.3)),
        Asset::new("ADA", "Cardano", dec!(45.50)).with_change(dec!(-1.2)),
        Asset::new("DOGE", "Dogecoin", dec!(12.80)).with_change(dec!(-0.5)),
        Asset::new("MATIC", "Polygon", dec!(68.42)).with_change(dec!(3.2)),
        Asset::new("SHIB", "Shiba Inu", dec!(0.0025)).with_change(dec!(5.2)),
        Asset::new("DOT", "Polkadot", dec!(620.75)).with_change(dec!(-0.7)),
    ];
    PriceTable::new(assets, PriceOrigin::Fallback)
}

/// Feed that always serves the hardcoded table. Used for offline mode
/// and tests.
pub struct StaticFeed;

#[async_trait]
impl PriceFeed for StaticFeed {
    async fn fetch(&self) -> Result<PriceTable> {
        Ok(fallback_table())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_feed_serves_fallback() {
        let table = StaticFeed.fetch().await.unwrap();
        assert_eq!(table.origin, PriceOrigin::Fallback);
        assert_eq!(table.len(), 11);
        assert_eq!(table.get("BTC").unwrap().price_inr, dec!(3842000));
        assert_eq!(table.get("ADA").unwrap().change_24h, dec!(-1.2));
    }
}
