//! Crypto Paper Trader
//!
//! Interactive chatbot over a simulated INR cash balance: view prices,
//! buy and sell virtual holdings, and get threshold-based advisories.

mod command;
mod render;
mod repl;

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trader_core::{CoinGeckoFeed, PriceFeed, StaticFeed, TradingSession};

use crate::repl::Repl;

fn starting_cash() -> Decimal {
    parse_starting_cash(std::env::var("TRADER_STARTING_CASH").ok())
}

/// Starting balance from the environment. Unparsable or non-positive
/// values fall back to the default; the cash balance must never start
/// below zero.
fn parse_starting_cash(raw: Option<String>) -> Decimal {
    let default = Decimal::from(100_000);
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse::<Decimal>() {
        Ok(cash) if cash > Decimal::ZERO => cash,
        _ => {
            tracing::warn!(value = %raw, "invalid TRADER_STARTING_CASH, using default");
            default
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let offline = std::env::var("TRADER_OFFLINE").is_ok_and(|v| v != "0" && !v.is_empty());
    let feed: Box<dyn PriceFeed> = if offline {
        Box::new(StaticFeed)
    } else {
        Box::new(CoinGeckoFeed::new())
    };
    tracing::info!(feed = feed.name(), "acquiring initial prices");

    let prices = feed.fetch().await?;
    let session = TradingSession::new(starting_cash(), prices);

    Repl::new(session, feed.as_ref()).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_starting_cash_defaults_when_unset() {
        assert_eq!(parse_starting_cash(None), dec!(100000));
    }

    #[test]
    fn test_starting_cash_accepts_positive_values() {
        assert_eq!(parse_starting_cash(Some("2500.50".into())), dec!(2500.50));
    }

    #[test]
    fn test_starting_cash_rejects_non_positive_and_garbage() {
        assert_eq!(parse_starting_cash(Some("-5".into())), dec!(100000));
        assert_eq!(parse_starting_cash(Some("0".into())), dec!(100000));
        assert_eq!(parse_starting_cash(Some("plenty".into())), dec!(100000));
    }
}
