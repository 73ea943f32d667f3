use std::fmt::Write;

use super::Snapshot;
use crate::models::Transaction;

/// Render a snapshot as the plain-text market report printed every tick
pub fn render(snapshot: &Snapshot, pair: &str) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write_report(&mut out, snapshot, pair);
    out
}

fn write_report(out: &mut String, s: &Snapshot, pair: &str) -> std::fmt::Result {
    writeln!(out, "=== {} market report ===", pair)?;

    match s.latest_price {
        Some(price) => writeln!(out, "Latest {} price: {:.6}", pair, price)?,
        None => writeln!(out, "Latest {} price: unavailable", pair)?,
    }
    writeln!(out, "Last action: {}", s.last_action)?;
    writeln!(out, "Invested: {:.2}", s.invested_amount)?;
    writeln!(out, "Total profit: {:.2}", s.cumulative_profit)?;
    writeln!(out, "Total balance: {:.2}", s.total_balance)?;

    writeln!(out, "\n--- Market KPIs ---")?;
    match &s.kpis {
        Some(kpis) => {
            writeln!(out, "Volatility over the window: {:.2}%", kpis.volatility)?;
            writeln!(out, "Average trend (up or down): {:.2}%", kpis.trend)?;
            writeln!(out, "Simulated volume from price moves: {:.2}%", kpis.volume)?;
        }
        None => writeln!(out, "Not enough data to compute market KPIs")?,
    }

    writeln!(out, "\n--- Transactions ---")?;
    if s.transaction_counts.total() == 0 {
        writeln!(out, "No transactions yet")?;
    } else {
        writeln!(out, "Buys: {}", s.transaction_counts.buys)?;
        writeln!(out, "Sells: {}", s.transaction_counts.sells)?;
    }

    writeln!(out, "\n--- Recent {} prices ---", pair)?;
    writeln!(out, "{:<20} {:>12}", "Timestamp", "Price")?;
    for sample in &s.prices {
        writeln!(
            out,
            "{:<20} {:>12.6}",
            sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sample.price
        )?;
    }

    writeln!(out, "\n--- Transaction history (last {}) ---", super::RECENT_TRANSACTIONS)?;
    if s.recent_transactions.is_empty() {
        writeln!(out, "No transactions yet")?;
    } else {
        writeln!(
            out,
            "{:<6} {:>12} {:>12} {:>10} {:<20}",
            "Action", "Price", "Amount", "Profit", "Time"
        )?;
        for tx in &s.recent_transactions {
            write_transaction(out, tx)?;
        }
    }

    Ok(())
}

fn write_transaction(out: &mut String, tx: &Transaction) -> std::fmt::Result {
    let profit = tx
        .profit
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());

    writeln!(
        out,
        "{:<6} {:>12.6} {:>12.2} {:>10} {:<20}",
        tx.action.to_string(),
        tx.price,
        tx.amount,
        profit,
        tx.timestamp.format("%Y-%m-%d %H:%M:%S")
    )
}
