//! # trader-core
//!
//! Engine for a simulated cryptocurrency paper-trading chatbot: a virtual
//! INR cash balance, holdings bought and sold at quoted prices, an
//! append-only trade ledger, and a threshold-based advisory engine.
//!
//! Nothing here talks to a terminal; the interactive loop lives in
//! `trader-cli`. Prices come through the [`feed::PriceFeed`] seam, either
//! live from CoinGecko or from a hardcoded fallback table, and every
//! acquired table reports which of the two it was.
//!
//! ## Shape
//!
//! ```text
//! PriceFeed ──fetch──▶ PriceTable ──┐
//!                                   ▼
//!                 TradingSession { Portfolio, TradeLedger, PriceTable }
//!                                   │
//!            buy / sell / analyze / refresh / total_value
//! ```
//!
//! All money and quantities are `rust_decimal::Decimal` - never f64.

pub mod advisor;
pub mod error;
pub mod feed;
pub mod model;
pub mod session;

pub use advisor::{advise, Advisory, AdvisoryPolicy, Recommendation, TradeLevels};
pub use error::{Result, TraderError};
pub use feed::{fallback_table, CoinGeckoFeed, PriceFeed, StaticFeed};
pub use model::{
    Asset, Portfolio, PriceOrigin, PriceTable, TradeAction, TradeLedger, TradeRecord,
};
pub use session::{SellAmount, TradingSession};
