//! Command Parsing
//!
//! Classifies one trimmed, lowercased input line against the fixed verb
//! set. Wrong argument counts and unparsable numbers come back as usage
//! errors with a hint; unknown verbs point at `help`.

use rust_decimal::Decimal;
use thiserror::Error;

use trader_core::SellAmount;

/// One recognized user command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Market,
    Portfolio,
    History,
    Refresh,
    Analyze { symbol: String },
    Buy { symbol: String, amount: Decimal },
    Sell { symbol: String, amount: SellAmount },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' to see available commands")]
    Unknown(String),

    #[error("'{verb}' usage: {hint}")]
    Usage { verb: &'static str, hint: &'static str },

    #[error("invalid {what} '{given}'; use a number like '{example}'")]
    BadNumber {
        what: &'static str,
        given: String,
        example: &'static str,
    },
}

impl Command {
    /// Parse a non-empty input line. The caller trims and skips empties.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim().to_lowercase();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (verb, args) = tokens
            .split_first()
            .ok_or_else(|| CommandError::Unknown(line.clone()))?;

        match (*verb, args) {
            ("exit" | "quit" | "q", []) => Ok(Self::Exit),
            ("help" | "h", []) => Ok(Self::Help),
            ("market" | "m" | "prices", []) => Ok(Self::Market),
            ("portfolio" | "pf" | "balance", []) => Ok(Self::Portfolio),
            ("history", []) => Ok(Self::History),
            ("refresh", []) => Ok(Self::Refresh),

            ("analyze", [symbol]) => Ok(Self::Analyze {
                symbol: symbol.to_uppercase(),
            }),
            ("analyze", _) => Err(CommandError::Usage {
                verb: "analyze",
                hint: "analyze [COIN], e.g. 'analyze BTC'",
            }),

            ("buy", [symbol, amount]) => {
                let amount = amount.parse::<Decimal>().map_err(|_| {
                    CommandError::BadNumber {
                        what: "amount",
                        given: (*amount).to_string(),
                        example: "buy BTC 10000",
                    }
                })?;
                Ok(Self::Buy {
                    symbol: symbol.to_uppercase(),
                    amount,
                })
            }
            ("buy", _) => Err(CommandError::Usage {
                verb: "buy",
                hint: "buy [COIN] [AMOUNT], e.g. 'buy BTC 10000'",
            }),

            ("sell", [symbol]) | ("sell", [symbol, "all"]) => Ok(Self::Sell {
                symbol: symbol.to_uppercase(),
                amount: SellAmount::All,
            }),
            ("sell", [symbol, quantity]) => {
                let quantity = quantity.parse::<Decimal>().map_err(|_| {
                    CommandError::BadNumber {
                        what: "quantity",
                        given: (*quantity).to_string(),
                        example: "sell BTC 0.5",
                    }
                })?;
                Ok(Self::Sell {
                    symbol: symbol.to_uppercase(),
                    amount: SellAmount::Quantity(quantity),
                })
            }
            ("sell", _) => Err(CommandError::Usage {
                verb: "sell",
                hint: "sell [COIN] [QUANTITY] or sell [COIN] all",
            }),

            _ => Err(CommandError::Unknown(line.clone())),
        }
    }
}
