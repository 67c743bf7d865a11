//! Terminal Rendering
//!
//! All human-readable output for the chatbot. Prices render as ₹ with
//! comma grouping and two decimals, quantities with six decimals.

use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use trader_core::{
    Advisory, Portfolio, PriceOrigin, PriceTable, Recommendation, TradeAction, TradeLedger,
    TradeRecord,
};

const RULE: &str = "============================================================";

/// ₹ amount with western comma grouping and two decimals
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let s = format!("{rounded:.2}");
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}₹{grouped}.{frac_part}")
}

/// Quantity with six decimals
pub fn quantity(value: Decimal) -> String {
    format!("{:.6}", value.round_dp(6))
}

fn change_marker(change: Decimal) -> String {
    if change >= Decimal::ZERO {
        format!("{} {:.1}%", "▲".green(), change.round_dp(1))
    } else {
        let magnitude = -change;
        format!("{} {:.1}%", "▼".red(), magnitude.round_dp(1))
    }
}

pub fn banner() {
    println!("\n{RULE}");
    println!("{}", "WELCOME TO THE CRYPTO PAPER TRADER".bold());
    println!("{RULE}");
    println!("Type 'help' to see available commands");
    println!("Type 'market' to see current prices");
    println!("{RULE}");
}

pub fn farewell() {
    println!("\n{} Goodbye! Happy trading!", "»".bright_black());
}

pub fn help(table: &PriceTable) {
    println!("\n{}", "COMMANDS".bold());
    println!("{RULE}");
    println!("  market              - Show current crypto prices");
    println!("  portfolio           - Show your portfolio and balance");
    println!("  buy [COIN] [AMOUNT] - Buy crypto (e.g. 'buy BTC 10000')");
    println!("  sell [COIN] [QTY]   - Sell crypto (e.g. 'sell BTC 0.5')");
    println!("  sell [COIN] all     - Sell all of a coin");
    println!("  analyze [COIN]      - Analyze a cryptocurrency");
    println!("  history             - Show your executed trades");
    println!("  refresh             - Re-fetch prices");
    println!("  help                - Show this menu");
    println!("  exit                - Exit the program");
    println!("\nAVAILABLE COINS:");
    println!("  {}", table.symbols().join(", "));
}

pub fn market(table: &PriceTable) {
    println!("\n{RULE}");
    println!("{}", "CURRENT CRYPTO PRICES".bold());
    if table.origin == PriceOrigin::Fallback {
        println!("{}", "(fallback prices - live data unavailable)".yellow());
    }
    println!("{RULE}");

    for asset in table.iter() {
        println!("{} ({}):", asset.symbol.bold(), asset.name);
        println!("  Price: {}", money(asset.price_inr));
        println!("  24h Change: {}", change_marker(asset.change_24h));
        println!();
    }
}

pub fn portfolio(portfolio: &Portfolio, table: &PriceTable, total_value: Decimal) {
    println!("\n{RULE}");
    println!("{}", "YOUR PORTFOLIO".bold());
    println!("{RULE}");
    println!("Cash Balance: {}", money(portfolio.cash_balance));

    if portfolio.is_empty() {
        println!("\nYou don't own any cryptocurrencies yet.");
        println!("Use 'buy BTC 10000' to start trading!");
        return;
    }

    println!("\nYour Holdings:");
    println!("----------------------------------------");

    // Table order keeps the listing stable between renders
    for symbol in table.symbols() {
        let Some(held) = portfolio.quantity(&symbol) else {
            continue;
        };
        let Some(asset) = table.get(&symbol) else {
            continue;
        };
        println!("{}: {} coins", symbol.bold(), quantity(held));
        println!("  Current Price: {}", money(asset.price_inr));
        println!("  Value: {}", money(held * asset.price_inr));
        println!();
    }

    // Holdings no longer quoted after a refresh
    for (symbol, held) in &portfolio.holdings {
        if !table.contains(symbol) {
            println!(
                "{}: {} coins {}",
                symbol.bold(),
                quantity(*held),
                "(no current quote)".yellow()
            );
        }
    }

    println!("----------------------------------------");
    println!("Total Portfolio Value: {}", money(total_value));
}

pub fn trade(record: &TradeRecord, new_balance: Decimal) {
    match record.action {
        TradeAction::Buy => {
            println!("\n{} {}", "✔".green(), "PURCHASE SUCCESSFUL!".bold());
            println!("Bought: {} {}", quantity(record.quantity), record.symbol);
            println!("Price: {} per coin", money(record.unit_price));
            println!("Total: {}", money(record.amount));
            println!("Remaining Balance: {}", money(new_balance));
        }
        TradeAction::Sell => {
            println!("\n{} {}", "✔".green(), "SALE SUCCESSFUL!".bold());
            println!("Sold: {} {}", quantity(record.quantity), record.symbol);
            println!("Price: {} per coin", money(record.unit_price));
            println!("Proceeds: {}", money(record.amount));
            println!("New Balance: {}", money(new_balance));
        }
    }
}

pub fn advisory(advisory: &Advisory) {
    println!(
        "\n{} {} ({})",
        "ANALYSIS FOR".bold(),
        advisory.symbol.bold(),
        advisory.name
    );
    println!("{RULE}");
    println!("Current Price: {}", money(advisory.price_inr));
    println!("24h Change: {}", change_marker(advisory.change_24h));

    let recommendation = match advisory.recommendation {
        Recommendation::Buy => format!("{}", "BUY".green().bold()),
        Recommendation::Hold => format!("{}", "HOLD".yellow().bold()),
        Recommendation::Sell => format!("{}", "SELL".red().bold()),
    };
    println!("\nRecommendation: {recommendation}");
    if let Some(confidence) = advisory.confidence {
        println!("Confidence: {confidence}%");
    }
    println!("Reason: {}", advisory.reason);

    if let Some(levels) = &advisory.levels {
        match advisory.recommendation {
            Recommendation::Buy => {
                println!("\nSuggested Entry: {}", money(levels.suggested));
                println!("Target: {} (+8%)", money(levels.target));
                println!("Stop Loss: {} (-3%)", money(levels.stop_loss));
            }
            Recommendation::Sell => {
                println!("\nSuggested Exit: {}", money(levels.suggested));
                println!("Target: {} (-8%)", money(levels.target));
                println!("Stop Loss: {} (+3%)", money(levels.stop_loss));
            }
            Recommendation::Hold => {}
        }
    }
}

pub fn history(ledger: &TradeLedger) {
    println!("\n{RULE}");
    println!("{}", "TRADE HISTORY".bold());
    println!("{RULE}");

    if ledger.is_empty() {
        println!("No trades yet.");
        return;
    }

    for record in ledger.records() {
        let action = match record.action {
            TradeAction::Buy => format!("{}", "BUY ".green()),
            TradeAction::Sell => format!("{}", "SELL".red()),
        };
        println!(
            "{}  {} {} {} @ {} = {}",
            record.executed_at.format("%Y-%m-%d %H:%M"),
            action,
            quantity(record.quantity),
            record.symbol.bold(),
            money(record.unit_price),
            money(record.amount),
        );
    }
}

pub fn refreshed(table: &PriceTable) {
    match table.origin {
        PriceOrigin::Live => {
            println!("\n{} Live prices loaded ({} coins)", "✔".green(), table.len());
        }
        PriceOrigin::Fallback => {
            println!(
                "\n{} Live data unavailable, using fallback prices",
                "!".yellow()
            );
        }
    }
}

pub fn error(message: &str) {
    println!("{} {message}", "✘".red());
}
