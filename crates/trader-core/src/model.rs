//! Domain Models
//!
//! Core data types for the simulated trading session.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quoted cryptocurrency asset
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Full name (e.g., "Bitcoin", "Ethereum")
    pub name: String,

    /// Current price in INR
    pub price_inr: Decimal,

    /// 24-hour price change percentage
    pub change_24h: Decimal,

    /// Last price update
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price_inr: Decimal) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            price_inr,
            change_24h: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    pub fn with_change(mut self, change_24h: Decimal) -> Self {
        self.change_24h = change_24h;
        self
    }
}

/// Where a price table came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceOrigin {
    /// Fetched from the live price API
    Live,
    /// Hardcoded fallback data
    Fallback,
}

/// A full quote table, replaced wholesale on refresh
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceTable {
    assets: BTreeMap<String, Asset>,

    /// Live fetch or fallback data
    pub origin: PriceOrigin,

    /// When the table was acquired
    pub fetched_at: DateTime<Utc>,
}

impl PriceTable {
    pub fn new(assets: impl IntoIterator<Item = Asset>, origin: PriceOrigin) -> Self {
        let assets = assets
            .into_iter()
            .map(|a| (a.symbol.clone(), a))
            .collect();
        Self {
            assets,
            origin,
            fetched_at: Utc::now(),
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, symbol: &str) -> Option<&Asset> {
        self.assets.get(&symbol.to_uppercase())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.contains_key(&symbol.to_uppercase())
    }

    /// Tickers in render order, for listings and error messages
    pub fn symbols(&self) -> Vec<String> {
        self.assets.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// The user's simulated portfolio
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash (INR). Invariant: never negative
    pub cash_balance: Decimal,

    /// Quantity held per symbol. Entries are removed on full
    /// liquidation, never left at zero
    pub holdings: HashMap<String, Decimal>,
}

impl Portfolio {
    pub fn new(starting_cash: Decimal) -> Self {
        Self {
            cash_balance: starting_cash,
            holdings: HashMap::new(),
        }
    }

    pub fn quantity(&self, symbol: &str) -> Option<Decimal> {
        self.holdings.get(&symbol.to_uppercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Trade direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// An executed trade. Immutable once appended to the ledger
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique record id
    pub id: Uuid,

    /// Execution timestamp
    pub executed_at: DateTime<Utc>,

    pub action: TradeAction,

    pub symbol: String,

    /// Units bought or sold
    pub quantity: Decimal,

    /// Unit price at execution
    pub unit_price: Decimal,

    /// Cash spent (buy) or received (sell)
    pub amount: Decimal,
}

impl TradeRecord {
    pub fn new(
        action: TradeAction,
        symbol: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            executed_at: Utc::now(),
            action,
            symbol: symbol.into(),
            quantity,
            unit_price,
            amount,
        }
    }
}

/// Append-only log of executed trades
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    /// Records in execution order
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
