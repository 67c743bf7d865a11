//! Trading Session
//!
//! Owns the portfolio, the trade ledger, and the current price table.
//! All mutation happens through `buy`/`sell`/`replace_prices`; a failed
//! operation leaves the session untouched.

use rust_decimal::Decimal;

use crate::error::{Result, TraderError};
use crate::model::{Portfolio, PriceTable, TradeAction, TradeLedger, TradeRecord};

/// How much of a holding to sell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SellAmount {
    /// Liquidate the entire holding
    All,
    /// Sell a specific quantity; clamped to the owned amount
    Quantity(Decimal),
}

/// A single user's trading state for the lifetime of the process
#[derive(Clone, Debug)]
pub struct TradingSession {
    portfolio: Portfolio,
    ledger: TradeLedger,
    prices: PriceTable,
}

impl TradingSession {
    pub fn new(starting_cash: Decimal, prices: PriceTable) -> Self {
        Self {
            portfolio: Portfolio::new(starting_cash),
            ledger: TradeLedger::new(),
            prices,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Spend `amount` of cash on `symbol` at the current unit price.
    ///
    /// Quantity acquired is `amount / unit_price`. Rejected (no mutation)
    /// if the symbol is unknown, the amount is not positive, or the amount
    /// exceeds the cash balance.
    pub fn buy(&mut self, symbol: &str, amount: Decimal) -> Result<TradeRecord> {
        let symbol = symbol.to_uppercase();
        let asset = self
            .prices
            .get(&symbol)
            .ok_or_else(|| TraderError::UnknownSymbol {
                symbol: symbol.clone(),
                available: self.prices.symbols(),
            })?;

        if amount <= Decimal::ZERO {
            return Err(TraderError::InvalidAmount(amount));
        }
        if amount > self.portfolio.cash_balance {
            return Err(TraderError::InsufficientFunds {
                needed: amount,
                available: self.portfolio.cash_balance,
            });
        }

        // Feeds never emit non-positive prices; guard anyway so a bad
        // table cannot divide by zero
        let unit_price = asset.price_inr;
        if unit_price <= Decimal::ZERO {
            return Err(TraderError::PriceUnavailable(symbol));
        }
        let quantity = amount / unit_price;

        self.portfolio.cash_balance -= amount;
        *self
            .portfolio
            .holdings
            .entry(symbol.clone())
            .or_insert(Decimal::ZERO) += quantity;

        let record = TradeRecord::new(TradeAction::Buy, symbol, quantity, unit_price, amount);
        self.ledger.append(record.clone());

        tracing::debug!(
            symbol = %record.symbol,
            %quantity,
            %amount,
            balance = %self.portfolio.cash_balance,
            "buy executed"
        );
        Ok(record)
    }

    /// Sell some or all of a held symbol at the current unit price.
    ///
    /// A requested quantity above the owned amount is clamped to it;
    /// `SellAmount::All` liquidates the holding. Full liquidation removes
    /// the holdings entry rather than leaving it at zero. Rejected (no
    /// mutation) if the symbol is not held or the quantity is not positive.
    pub fn sell(&mut self, symbol: &str, amount: SellAmount) -> Result<TradeRecord> {
        let symbol = symbol.to_uppercase();
        let owned = self
            .portfolio
            .quantity(&symbol)
            .ok_or_else(|| TraderError::NotHeld(symbol.clone()))?;

        let quantity = match amount {
            SellAmount::All => owned,
            SellAmount::Quantity(q) if q <= Decimal::ZERO => {
                return Err(TraderError::InvalidAmount(q));
            }
            SellAmount::Quantity(q) => q.min(owned),
        };

        // A refresh may have dropped the symbol from the table
        let unit_price = self
            .prices
            .get(&symbol)
            .map(|a| a.price_inr)
            .ok_or_else(|| TraderError::PriceUnavailable(symbol.clone()))?;

        let proceeds = quantity * unit_price;
        self.portfolio.cash_balance += proceeds;

        if quantity == owned {
            self.portfolio.holdings.remove(&symbol);
        } else if let Some(held) = self.portfolio.holdings.get_mut(&symbol) {
            *held -= quantity;
        }

        let record = TradeRecord::new(TradeAction::Sell, symbol, quantity, unit_price, proceeds);
        self.ledger.append(record.clone());

        tracing::debug!(
            symbol = %record.symbol,
            %quantity,
            %proceeds,
            balance = %self.portfolio.cash_balance,
            "sell executed"
        );
        Ok(record)
    }

    /// Cash plus the market value of every holding still quoted in the
    /// current table. Holdings without a quote contribute nothing.
    pub fn total_value(&self) -> Decimal {
        let holdings_value: Decimal = self
            .portfolio
            .holdings
            .iter()
            .filter_map(|(symbol, quantity)| {
                self.prices.get(symbol).map(|a| *quantity * a.price_inr)
            })
            .sum();
        self.portfolio.cash_balance + holdings_value
    }

    /// Atomic table swap, used by the refresh command
    pub fn replace_prices(&mut self, prices: PriceTable) {
        tracing::debug!(origin = ?prices.origin, assets = prices.len(), "price table replaced");
        self.prices = prices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fallback_table;
    use rust_decimal_macros::dec;

    fn session() -> TradingSession {
        TradingSession::new(dec!(100000), fallback_table())
    }

    #[test]
    fn test_buy_debits_cash_and_credits_holdings() {
        let mut s = session();

        let record = s.buy("BTC", dec!(10000)).unwrap();

        assert_eq!(record.action, TradeAction::Buy);
        assert_eq!(record.unit_price, dec!(3842000));
        assert_eq!(record.amount, dec!(10000));
        assert_eq!(s.portfolio().cash_balance, dec!(90000));

        let quantity = s.portfolio().quantity("BTC").unwrap();
        // 10000 / 3842000 ≈ 0.0026029
        assert!((quantity - dec!(0.0026029)).abs() < dec!(0.0000001));
        assert_eq!(quantity, record.quantity);
        assert_eq!(s.ledger().len(), 1);
    }

    #[test]
    fn test_buy_accumulates_existing_holding() {
        let mut s = session();
        s.buy("ETH", dec!(5000)).unwrap();
        s.buy("eth", dec!(5000)).unwrap();

        assert_eq!(s.portfolio().holdings.len(), 1);
        let quantity = s.portfolio().quantity("ETH").unwrap();
        assert_eq!(quantity, dec!(10000) / dec!(218000));
    }

    #[test]
    fn test_buy_unknown_symbol_is_rejected_without_mutation() {
        let mut s = session();

        let err = s.buy("FOO", dec!(100)).unwrap_err();
        assert!(matches!(err, TraderError::UnknownSymbol { .. }));
        assert_eq!(s.portfolio().cash_balance, dec!(100000));
        assert!(s.portfolio().is_empty());
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn test_buy_over_balance_is_rejected_without_mutation() {
        let mut s = session();

        let err = s.buy("BTC", dec!(100001)).unwrap_err();
        assert!(matches!(err, TraderError::InsufficientFunds { .. }));
        assert_eq!(s.portfolio().cash_balance, dec!(100000));
        assert!(s.portfolio().is_empty());
    }

    #[test]
    fn test_buy_non_positive_amount_is_rejected() {
        let mut s = session();

        assert!(matches!(
            s.buy("BTC", Decimal::ZERO),
            Err(TraderError::InvalidAmount(_))
        ));
        assert!(matches!(
            s.buy("BTC", dec!(-50)),
            Err(TraderError::InvalidAmount(_))
        ));
        assert_eq!(s.portfolio().cash_balance, dec!(100000));
    }

    #[test]
    fn test_sell_all_round_trips_the_balance() {
        let mut s = session();
        s.buy("BTC", dec!(10000)).unwrap();

        let record = s.sell("BTC", SellAmount::All).unwrap();

        assert_eq!(record.action, TradeAction::Sell);
        // quantity * price round-trips up to division rounding
        assert!((s.portfolio().cash_balance - dec!(100000)).abs() < dec!(0.01));
        assert!(s.portfolio().is_empty());
        assert_eq!(s.ledger().len(), 2);
    }

    #[test]
    fn test_partial_sell_leaves_remainder() {
        let mut s = session();
        s.buy("SOL", dec!(11684)).unwrap(); // 2 SOL at 5842
        let owned = s.portfolio().quantity("SOL").unwrap();

        s.sell("SOL", SellAmount::Quantity(dec!(1))).unwrap();

        assert_eq!(s.portfolio().quantity("SOL").unwrap(), owned - dec!(1));
        assert_eq!(s.portfolio().cash_balance, dec!(100000) - dec!(11684) + dec!(5842));
    }

    #[test]
    fn test_sell_quantity_above_owned_is_clamped_to_all() {
        let mut s = session();
        s.buy("ADA", dec!(455)).unwrap(); // 10 ADA at 45.50
        let owned = s.portfolio().quantity("ADA").unwrap();

        let record = s.sell("ADA", SellAmount::Quantity(dec!(9999))).unwrap();

        assert_eq!(record.quantity, owned);
        assert!(s.portfolio().quantity("ADA").is_none());
    }

    #[test]
    fn test_sell_all_equals_sell_owned_quantity() {
        let mut a = session();
        let mut b = session();
        a.buy("DOGE", dec!(128)).unwrap();
        b.buy("DOGE", dec!(128)).unwrap();
        let owned = b.portfolio().quantity("DOGE").unwrap();

        a.sell("DOGE", SellAmount::All).unwrap();
        b.sell("DOGE", SellAmount::Quantity(owned)).unwrap();

        assert_eq!(a.portfolio().cash_balance, b.portfolio().cash_balance);
        assert!(a.portfolio().is_empty());
        assert!(b.portfolio().is_empty());
    }

    #[test]
    fn test_sell_unheld_symbol_is_rejected_without_mutation() {
        let mut s = session();

        let err = s.sell("BTC", SellAmount::All).unwrap_err();
        assert!(matches!(err, TraderError::NotHeld(_)));
        assert_eq!(s.portfolio().cash_balance, dec!(100000));
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn test_sell_non_positive_quantity_is_rejected() {
        let mut s = session();
        s.buy("XRP", dec!(523)).unwrap();
        let balance = s.portfolio().cash_balance;

        let err = s.sell("XRP", SellAmount::Quantity(dec!(0))).unwrap_err();
        assert!(matches!(err, TraderError::InvalidAmount(_)));
        assert_eq!(s.portfolio().cash_balance, balance);
    }

    #[test]
    fn test_buy_at_zero_price_is_rejected_without_mutation() {
        let mut s = TradingSession::new(
            dec!(100000),
            PriceTable::new(
                [crate::model::Asset::new("BTC", "Bitcoin", Decimal::ZERO)],
                crate::model::PriceOrigin::Live,
            ),
        );

        let err = s.buy("BTC", dec!(100)).unwrap_err();
        assert!(matches!(err, TraderError::PriceUnavailable(_)));
        assert_eq!(s.portfolio().cash_balance, dec!(100000));
        assert!(s.portfolio().is_empty());
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn test_total_value_skips_unquoted_holdings() {
        let mut s = session();
        s.buy("BTC", dec!(10000)).unwrap();
        assert!((s.total_value() - dec!(100000)).abs() < dec!(0.01));

        // Refresh to a table that no longer quotes BTC
        s.replace_prices(PriceTable::new(
            [crate::model::Asset::new("ETH", "Ethereum", dec!(218000))],
            crate::model::PriceOrigin::Fallback,
        ));

        // The held BTC has no quote and contributes nothing
        assert_eq!(s.total_value(), dec!(90000));
    }

    #[test]
    fn test_sell_without_quote_is_rejected() {
        let mut s = session();
        s.buy("BTC", dec!(10000)).unwrap();
        s.replace_prices(PriceTable::new(
            [crate::model::Asset::new("ETH", "Ethereum", dec!(218000))],
            crate::model::PriceOrigin::Fallback,
        ));

        let err = s.sell("BTC", SellAmount::All).unwrap_err();
        assert!(matches!(err, TraderError::PriceUnavailable(_)));
        assert!(s.portfolio().quantity("BTC").is_some());
    }
}
