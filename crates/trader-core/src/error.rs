//! Error Types for the Trading Engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraderError>;

#[derive(Error, Debug)]
pub enum TraderError {
    #[error("{symbol} not found; available: {}", .available.join(", "))]
    UnknownSymbol {
        symbol: String,
        available: Vec<String>,
    },

    #[error("you don't own any {0}")]
    NotHeld(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientFunds {
        needed: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    #[error("amount must be positive, got {0}")]
    InvalidAmount(rust_decimal::Decimal),

    #[error("price unavailable for {0}")]
    PriceUnavailable(String),

    #[error("malformed price response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
