//! Command Loop
//!
//! Reads one line at a time, classifies it, and dispatches against the
//! trading session. A failed command is reported and the loop continues;
//! only `exit`, end of input, or Ctrl-C terminate the session.

use std::io::Write;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use trader_core::{advise, AdvisoryPolicy, PriceFeed, TraderError, TradingSession};

use crate::command::Command;
use crate::render;

pub struct Repl<'a> {
    session: TradingSession,
    feed: &'a dyn PriceFeed,
    policy: AdvisoryPolicy,
}

impl<'a> Repl<'a> {
    pub fn new(session: TradingSession, feed: &'a dyn PriceFeed) -> Self {
        Self {
            session,
            feed,
            policy: AdvisoryPolicy::default(),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        render::banner();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("\n{} ", "You:".bold());
            std::io::stdout().flush()?;

            let line = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    render::farewell();
                    break;
                }
                line = lines.next_line() => line?,
            };

            // None is end of input
            let Some(line) = line else {
                render::farewell();
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Command::parse(line) {
                Ok(Command::Exit) => {
                    render::farewell();
                    break;
                }
                Ok(command) => {
                    if let Err(e) = self.dispatch(command).await {
                        render::error(&e.to_string());
                    }
                }
                Err(e) => render::error(&e.to_string()),
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> Result<(), TraderError> {
        match command {
            Command::Help => render::help(self.session.prices()),
            Command::Market => render::market(self.session.prices()),
            Command::Portfolio => render::portfolio(
                self.session.portfolio(),
                self.session.prices(),
                self.session.total_value(),
            ),
            Command::History => render::history(self.session.ledger()),
            Command::Analyze { symbol } => {
                let asset = self.session.prices().get(&symbol).ok_or_else(|| {
                    TraderError::UnknownSymbol {
                        symbol: symbol.clone(),
                        available: self.session.prices().symbols(),
                    }
                })?;
                let advisory = advise(asset, self.policy).with_random_confidence();
                render::advisory(&advisory);
            }
            Command::Buy { symbol, amount } => {
                let record = self.session.buy(&symbol, amount)?;
                render::trade(&record, self.session.portfolio().cash_balance);
            }
            Command::Sell { symbol, amount } => {
                let record = self.session.sell(&symbol, amount)?;
                render::trade(&record, self.session.portfolio().cash_balance);
            }
            Command::Refresh => {
                println!("\nRefreshing prices...");
                let table = self.feed.fetch().await?;
                self.session.replace_prices(table);
                render::refreshed(self.session.prices());
            }
            // Exit is handled by the loop
            Command::Exit => {}
        }
        Ok(())
    }
}
