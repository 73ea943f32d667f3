use crate::execution::{TickOutcome, TradingEngine};
use crate::models::PriceSample;
use crate::report::Snapshot;

/// Totals collected while replaying a price series
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub bootstraps: usize,
    pub trades: usize,
    pub skipped_triggers: usize,
    pub rejected: usize,
    pub snapshot: Snapshot,
}

impl ReplaySummary {
    /// Profit relative to the starting balance, in percent
    pub fn return_pct(&self, initial_balance: f64) -> f64 {
        (self.snapshot.total_balance - initial_balance) / initial_balance * 100.0
    }
}

/// Replays a series of samples through a trading session, tick by tick
pub struct ReplayRunner;

impl ReplayRunner {
    /// Feed every sample to `engine` in order
    ///
    /// Rejected samples are counted and skipped; they never abort the run.
    pub fn run(engine: &mut TradingEngine, samples: &[PriceSample]) -> ReplaySummary {
        let mut bootstraps = 0;
        let mut trades = 0;
        let mut skipped_triggers = 0;
        let mut rejected = 0;

        tracing::info!("Starting replay: {} samples", samples.len());

        for sample in samples {
            match engine.ingest_sample(sample.price, sample.timestamp) {
                Ok(TickOutcome::Bootstrapped) => bootstraps += 1,
                Ok(TickOutcome::Executed(_)) => trades += 1,
                Ok(TickOutcome::NothingToTrade { .. }) => skipped_triggers += 1,
                Ok(TickOutcome::Held { .. }) => {}
                Err(e) => {
                    tracing::warn!("Skipping sample: {}", e);
                    rejected += 1;
                }
            }
        }

        let snapshot = engine.snapshot();
        tracing::info!(
            "Replay finished: {} trades, {} rejected, total balance {:.2}",
            trades,
            rejected,
            snapshot.total_balance
        );

        ReplaySummary {
            ticks: samples.len(),
            bootstraps,
            trades,
            skipped_triggers,
            rejected,
            snapshot,
        }
    }
}
