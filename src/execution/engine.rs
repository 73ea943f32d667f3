use chrono::{DateTime, Utc};

use crate::error::{ensure_positive, EngineError};
use crate::execution::{PortfolioState, PriceWindow, TransactionLedger};
use crate::models::{PriceSample, TradeAction, Transaction};
use crate::report::{ReportAssembler, Snapshot};
use crate::strategy::{Decision, ThresholdReversion};

/// What a single tick did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// First price of the session became the reference price
    Bootstrapped,
    /// Price stayed inside the sensitivity band
    Held { variation_pct: f64 },
    /// A trigger fired but there was nothing to move on that side
    ///
    /// A buy trigger still moves the reference price to the current price.
    NothingToTrade {
        action: TradeAction,
        variation_pct: f64,
    },
    Executed(Transaction),
}

/// Trading session for a single instrument
///
/// Owns the price window, the portfolio and the ledger. Each call to
/// [`TradingEngine::ingest_sample`] runs one full decision cycle; a trade
/// and its ledger entry are always produced together.
#[derive(Debug, Clone)]
pub struct TradingEngine {
    window: PriceWindow,
    portfolio: PortfolioState,
    ledger: TransactionLedger,
    strategy: ThresholdReversion,
    initial_balance: f64,
}

impl TradingEngine {
    pub fn new(initial_balance: f64, sensitivity: f64) -> Result<Self, EngineError> {
        let initial_balance = ensure_positive("initial_balance", initial_balance)?;
        let strategy = ThresholdReversion::new(sensitivity)?;

        Ok(Self {
            window: PriceWindow::new(),
            portfolio: PortfolioState::new(initial_balance),
            ledger: TransactionLedger::new(),
            strategy,
            initial_balance,
        })
    }

    /// Reconfigure the session
    ///
    /// The sensitivity can change at any time. The initial balance can only
    /// change while no trade has been executed; both values are validated
    /// before anything is modified.
    pub fn configure(&mut self, initial_balance: f64, sensitivity: f64) -> Result<(), EngineError> {
        let initial_balance = ensure_positive("initial_balance", initial_balance)?;
        ensure_positive("sensitivity", sensitivity)?;

        if initial_balance != self.initial_balance && !self.ledger.is_empty() {
            return Err(EngineError::Configuration(format!(
                "initial_balance cannot change after {} trade(s) have executed",
                self.ledger.len()
            )));
        }

        self.strategy.set_sensitivity(sensitivity)?;
        if initial_balance != self.initial_balance {
            self.initial_balance = initial_balance;
            self.portfolio.reset_balance(initial_balance);
        }

        tracing::info!(
            "Session configured: initial balance {:.2}, sensitivity {}%",
            initial_balance,
            sensitivity
        );
        Ok(())
    }

    /// Change the sensitivity between ticks without touching other state
    pub fn set_sensitivity(&mut self, sensitivity: f64) -> Result<(), EngineError> {
        self.strategy.set_sensitivity(sensitivity)
    }

    /// Feed one price into the session and run a full decision cycle
    pub fn ingest_sample(
        &mut self,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<TickOutcome, EngineError> {
        if !price.is_finite() || price <= 0.0 {
            tracing::warn!("Rejected price sample {} at {}", price, timestamp);
            return Err(EngineError::InvalidSample { price });
        }

        self.window.push(PriceSample::new(price, timestamp));

        let outcome = match self.strategy.decide(price, self.portfolio.reference_price()) {
            Decision::Bootstrap => {
                self.portfolio.set_reference_price(price);
                tracing::info!("Reference price set to {:.6}", price);
                TickOutcome::Bootstrapped
            }
            Decision::Hold { variation_pct } => TickOutcome::Held { variation_pct },
            Decision::Buy { variation_pct } => self.buy(price, variation_pct, timestamp),
            Decision::Sell { variation_pct } => self.sell(price, variation_pct, timestamp),
        };

        Ok(outcome)
    }

    fn buy(&mut self, price: f64, variation_pct: f64, timestamp: DateTime<Utc>) -> TickOutcome {
        if !self.portfolio.has_cash() {
            // Re-anchor so a rebound from the new low can still sell
            self.portfolio.set_reference_price(price);
            tracing::debug!(
                "Buy trigger at {:.6} ({:+.2}%) with no cash available, reference moved",
                price,
                variation_pct
            );
            return TickOutcome::NothingToTrade {
                action: TradeAction::Buy,
                variation_pct,
            };
        }

        let invested = self.portfolio.open(price);
        let transaction = Transaction::buy(price, invested, timestamp);
        self.ledger.append(transaction.clone());

        tracing::info!(
            "🟢 BUY @ {:.6} ({:+.2}%): invested {:.2}",
            price,
            variation_pct,
            invested
        );
        TickOutcome::Executed(transaction)
    }

    fn sell(&mut self, price: f64, variation_pct: f64, timestamp: DateTime<Utc>) -> TickOutcome {
        if !self.portfolio.is_holding() {
            tracing::debug!(
                "Sell trigger at {:.6} ({:+.2}%) with no open position",
                price,
                variation_pct
            );
            return TickOutcome::NothingToTrade {
                action: TradeAction::Sell,
                variation_pct,
            };
        }

        let fill = self.portfolio.close(price, variation_pct);
        let transaction = Transaction::sell(price, self.portfolio.balance(), fill.profit, timestamp);
        self.ledger.append(transaction.clone());

        tracing::info!(
            "🔴 SELL @ {:.6} ({:+.2}%): proceeds {:.2}, profit {:.2}, balance {:.2}",
            price,
            variation_pct,
            fill.proceeds,
            fill.profit,
            self.portfolio.balance()
        );
        TickOutcome::Executed(transaction)
    }

    /// Read-only view of the session for presentation layers
    pub fn snapshot(&self) -> Snapshot {
        ReportAssembler::new(self).snapshot()
    }

    pub fn window(&self) -> &PriceWindow {
        &self.window
    }

    pub fn portfolio(&self) -> &PortfolioState {
        &self.portfolio
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn sensitivity(&self) -> f64 {
        self.strategy.sensitivity()
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }
}
