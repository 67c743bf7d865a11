//! Advisory Engine
//!
//! Maps a 24-hour percent change to a buy/hold/sell recommendation with a
//! canned narrative and fixed target/stop-loss offsets. Evaluation is a
//! pure function of the change; the confidence score is decorative and
//! attached separately.
//!
//! Two threshold tables exist and disagree on small dips: at change =
//! -1.2 `Banded` says HOLD while `Momentum` says SELL. They are kept as
//! selectable policies rather than merged into one table.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::Asset;

/// Non-binding trade recommendation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Hold => write!(f, "HOLD"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Which threshold table to apply
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryPolicy {
    /// Four-band table: >3 BUY, (1,3] HOLD, <-2 SELL, otherwise HOLD
    #[default]
    Banded,
    /// Sign-based table: >3 BUY, (0,3] HOLD, <=0 SELL
    Momentum,
}

/// Suggested price levels for a directional recommendation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLevels {
    /// Suggested entry (BUY) or exit (SELL) price
    pub suggested: Decimal,
    /// Take-profit target
    pub target: Decimal,
    /// Stop-loss
    pub stop_loss: Decimal,
}

/// A complete advisory for one asset
#[derive(Clone, Debug, Serialize)]
pub struct Advisory {
    pub symbol: String,
    pub name: String,
    pub price_inr: Decimal,
    pub change_24h: Decimal,
    pub recommendation: Recommendation,
    pub reason: &'static str,
    /// Present only for BUY/SELL
    pub levels: Option<TradeLevels>,
    /// Decorative confidence percent in [70, 95]; no statistical basis
    pub confidence: Option<u8>,
}

/// Evaluate an asset under the given policy. Pure and deterministic;
/// attach a confidence afterwards if wanted.
pub fn advise(asset: &Asset, policy: AdvisoryPolicy) -> Advisory {
    let change = asset.change_24h;

    let (recommendation, reason) = match policy {
        AdvisoryPolicy::Banded => {
            if change > dec!(3) {
                (Recommendation::Buy, "Strong upward momentum")
            } else if change > dec!(1) {
                (Recommendation::Hold, "Moderate gains, watch closely")
            } else if change < dec!(-2) {
                (Recommendation::Sell, "Significant downward pressure")
            } else {
                (Recommendation::Hold, "Stable price movement")
            }
        }
        AdvisoryPolicy::Momentum => {
            if change > dec!(3) {
                (Recommendation::Buy, "Strong momentum")
            } else if change > Decimal::ZERO {
                (Recommendation::Hold, "Moderate growth")
            } else {
                (Recommendation::Sell, "Downward trend")
            }
        }
    };

    let price = asset.price_inr;
    let levels = match recommendation {
        Recommendation::Buy => Some(TradeLevels {
            suggested: price * dec!(0.995),
            target: price * dec!(1.08),
            stop_loss: price * dec!(0.97),
        }),
        Recommendation::Sell => Some(TradeLevels {
            suggested: price * dec!(1.005),
            target: price * dec!(0.92),
            stop_loss: price * dec!(1.03),
        }),
        Recommendation::Hold => None,
    };

    Advisory {
        symbol: asset.symbol.clone(),
        name: asset.name.clone(),
        price_inr: price,
        change_24h: change,
        recommendation,
        reason,
        levels,
        confidence: None,
    }
}

impl Advisory {
    /// Attach a decorative confidence percent drawn from [70, 95]
    pub fn with_confidence<R: Rng>(mut self, rng: &mut R) -> Self {
        self.confidence = Some(rng.random_range(70..=95));
        self
    }

    /// Convenience wrapper over the thread-local RNG
    pub fn with_random_confidence(self) -> Self {
        self.with_confidence(&mut rand::rng())
    }
}
