use chrono::{DateTime, Duration, Utc};
use fxbot::execution::WINDOW_CAPACITY;
use fxbot::*;

fn ts(i: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::seconds(i * 5)
}

#[test]
fn test_reference_scenario() {
    let mut engine = TradingEngine::new(1000.0, 1.0).unwrap();

    // Tick 1: bootstrap
    let outcome = engine.ingest_sample(1.10000, ts(0)).unwrap();
    assert_eq!(outcome, TickOutcome::Bootstrapped);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.reference_price, Some(1.10000));
    assert_eq!(snapshot.transaction_counts.total(), 0);

    // Tick 2: -1.09% → buy
    engine.ingest_sample(1.08800, ts(1)).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.last_action, LastAction::Buy);
    assert_eq!(snapshot.invested_amount, 1000.0);
    assert_eq!(snapshot.balance, 0.0);
    assert_eq!(snapshot.reference_price, Some(1.08800));

    // Tick 3: +1.10% → sell
    engine.ingest_sample(1.10000, ts(2)).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.last_action, LastAction::Sell);
    assert_eq!(snapshot.invested_amount, 0.0);
    assert!((snapshot.balance - 1011.03).abs() < 0.01);
    assert!((snapshot.cumulative_profit - 11.03).abs() < 0.01);
    assert!((snapshot.total_balance - snapshot.balance).abs() < 1e-12);

    let sell = &snapshot.recent_transactions[0];
    assert_eq!(sell.action, TradeAction::Sell);
    assert_eq!(sell.amount, snapshot.balance);
    assert_eq!(sell.profit, Some(snapshot.cumulative_profit));

    let buy = &snapshot.recent_transactions[1];
    assert_eq!(buy.action, TradeAction::Buy);
    assert_eq!(buy.amount, 1000.0);
    assert_eq!(buy.profit, None);
}

#[test]
fn test_window_keeps_last_twenty_newest_first() {
    let mut engine = TradingEngine::new(1000.0, 50.0).unwrap();
    let prices: Vec<f64> = (0..25).map(|i| 1.0 + i as f64 * 0.001).collect();

    for (i, &price) in prices.iter().enumerate() {
        engine.ingest_sample(price, ts(i as i64)).unwrap();
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.prices.len(), WINDOW_CAPACITY);
    assert_eq!(snapshot.latest_price, Some(prices[24]));

    let kept: Vec<f64> = snapshot.prices.iter().map(|s| s.price).collect();
    let expected: Vec<f64> = prices[5..].iter().rev().copied().collect();
    assert_eq!(kept, expected);
}

#[test]
fn test_negative_sample_is_rejected_without_side_effects() {
    let mut engine = TradingEngine::new(1000.0, 1.0).unwrap();
    engine.ingest_sample(1.10, ts(0)).unwrap();
    engine.ingest_sample(1.08, ts(1)).unwrap();
    let before = engine.snapshot();

    let result = engine.ingest_sample(-5.0, ts(2));

    assert_eq!(result, Err(EngineError::InvalidSample { price: -5.0 }));
    let after = engine.snapshot();
    assert_eq!(after.prices, before.prices);
    assert_eq!(after.balance, before.balance);
    assert_eq!(after.invested_amount, before.invested_amount);
    assert_eq!(after.reference_price, before.reference_price);
    assert_eq!(after.recent_transactions, before.recent_transactions);
}

#[test]
fn test_kpis_absent_until_two_samples() {
    let mut engine = TradingEngine::new(1000.0, 1.0).unwrap();
    assert!(engine.snapshot().kpis.is_none());

    engine.ingest_sample(1.10, ts(0)).unwrap();
    assert!(engine.snapshot().kpis.is_none());

    engine.ingest_sample(1.11, ts(1)).unwrap();
    let kpis = engine.snapshot().kpis.unwrap();
    assert!(kpis.volatility.is_finite());
    assert!(kpis.trend > 0.0);
    assert!(kpis.volume > 0.0);
}

#[test]
fn test_ledger_is_append_only_across_ticks() {
    let mut engine = TradingEngine::new(1000.0, 0.5).unwrap();
    let prices = [1.10, 1.09, 1.10, 1.08, 1.085, 1.10, 1.12, 1.11, 1.09, 1.10];

    let mut previous: Vec<Transaction> = Vec::new();
    for (i, &price) in prices.iter().enumerate() {
        engine.ingest_sample(price, ts(i as i64)).unwrap();

        let current: Vec<Transaction> = engine.ledger().iter().cloned().collect();
        assert!(current.len() >= previous.len());
        assert_eq!(&current[..previous.len()], &previous[..]);
        previous = current;
    }
}

#[test]
fn test_conservation_on_every_trade() {
    let mut engine = TradingEngine::new(1000.0, 0.5).unwrap();
    let prices = [1.10, 1.09, 1.10, 1.08, 1.085, 1.10, 1.12, 1.11, 1.09, 1.10];

    for (i, &price) in prices.iter().enumerate() {
        let before = engine.portfolio().clone();
        let outcome = engine.ingest_sample(price, ts(i as i64)).unwrap();
        let after = engine.portfolio();

        if let TickOutcome::Executed(tx) = outcome {
            match tx.action {
                TradeAction::Buy => {
                    assert_eq!(after.balance(), 0.0);
                    assert_eq!(after.invested_amount(), before.balance());
                }
                TradeAction::Sell => {
                    assert_eq!(after.invested_amount(), 0.0);
                    let profit = tx.profit.unwrap();
                    let proceeds = before.invested_amount() + profit;
                    assert!((after.balance() - (before.balance() + proceeds)).abs() < 1e-9);
                    assert!(
                        (after.cumulative_profit() - (before.cumulative_profit() + profit)).abs()
                            < 1e-9
                    );
                }
            }
        }

        assert!(after.balance() == 0.0 || after.invested_amount() == 0.0);
    }
}

#[test]
fn test_sessions_are_isolated() {
    let mut a = TradingEngine::new(1000.0, 1.0).unwrap();
    let mut b = TradingEngine::new(500.0, 1.0).unwrap();

    a.ingest_sample(1.10, ts(0)).unwrap();
    a.ingest_sample(1.08, ts(1)).unwrap();
    b.ingest_sample(2.00, ts(0)).unwrap();

    assert_eq!(a.ledger().len(), 1);
    assert!(b.ledger().is_empty());
    assert_eq!(b.portfolio().balance(), 500.0);
    assert_eq!(b.window().len(), 1);
}
