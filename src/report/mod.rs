// Read-only session snapshots for presentation layers
pub mod console;

use serde::Serialize;

use crate::execution::{ActionCounts, TradingEngine};
use crate::indicators::{compute_kpis, MarketKpis};
use crate::models::{LastAction, PriceSample, Transaction};

/// Number of transactions included in a snapshot
pub const RECENT_TRANSACTIONS: usize = 10;

/// Everything a display surface needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub latest_price: Option<f64>,
    pub last_action: LastAction,
    pub balance: f64,
    pub invested_amount: f64,
    pub cumulative_profit: f64,
    /// Cash plus invested amount
    pub total_balance: f64,
    pub reference_price: Option<f64>,
    pub sensitivity: f64,
    /// None when the window is too short for KPIs
    pub kpis: Option<MarketKpis>,
    pub transaction_counts: ActionCounts,
    /// Newest first
    pub prices: Vec<PriceSample>,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

/// Composes window, KPIs, portfolio and ledger into a [`Snapshot`]
pub struct ReportAssembler<'a> {
    engine: &'a TradingEngine,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(engine: &'a TradingEngine) -> Self {
        Self { engine }
    }

    pub fn snapshot(&self) -> Snapshot {
        let window = self.engine.window();
        let portfolio = self.engine.portfolio();
        let ledger = self.engine.ledger();

        Snapshot {
            latest_price: window.latest().map(|s| s.price),
            last_action: portfolio.last_action(),
            balance: portfolio.balance(),
            invested_amount: portfolio.invested_amount(),
            cumulative_profit: portfolio.cumulative_profit(),
            total_balance: portfolio.total_balance(),
            reference_price: portfolio.reference_price(),
            sensitivity: self.engine.sensitivity(),
            kpis: compute_kpis(window),
            transaction_counts: ledger.count_by_action(),
            prices: window.to_vec(),
            recent_transactions: ledger.recent(RECENT_TRANSACTIONS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_snapshot_of_fresh_engine() {
        let engine = TradingEngine::new(1000.0, 1.0).unwrap();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.latest_price, None);
        assert_eq!(snapshot.last_action, LastAction::None);
        assert_eq!(snapshot.total_balance, 1000.0);
        assert!(snapshot.kpis.is_none());
        assert!(snapshot.prices.is_empty());
        assert!(snapshot.recent_transactions.is_empty());
    }

    #[test]
    fn test_snapshot_limits_recent_transactions() {
        let mut engine = TradingEngine::new(1000.0, 1.0).unwrap();
        let start = Utc::now();

        // Alternate 1.00 / 0.98 / 1.00 ... to trade on every tick after bootstrap
        for i in 0..30 {
            let price = if i % 2 == 0 { 1.00 } else { 0.98 };
            engine
                .ingest_sample(price, start + Duration::seconds(i))
                .unwrap();
        }

        let snapshot = ReportAssembler::new(&engine).snapshot();
        assert_eq!(engine.ledger().len(), 29);
        assert_eq!(snapshot.recent_transactions.len(), RECENT_TRANSACTIONS);
        assert_eq!(
            snapshot.recent_transactions[0].id,
            engine.ledger().last().unwrap().id
        );
        assert_eq!(snapshot.prices.len(), 20);
        assert_eq!(snapshot.transaction_counts.total(), 29);
        assert!(snapshot.kpis.is_some());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut engine = TradingEngine::new(1000.0, 1.0).unwrap();
        engine.ingest_sample(1.10, Utc::now()).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["latest_price"], 1.10);
        assert!(json["kpis"].is_null());
        assert_eq!(json["transaction_counts"]["buys"], 0);
    }
}
