use crate::models::LastAction;

/// Cash and position bookkeeping for one trading session
///
/// All capital sits either in `balance` (flat) or in `invested_amount`
/// (holding), never in both. Only the engine mutates this state.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    balance: f64,
    invested_amount: f64,
    /// Price of the last executed trade, or the bootstrap price
    reference_price: Option<f64>,
    cumulative_profit: f64,
    last_action: LastAction,
}

/// Result of closing the position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellFill {
    pub proceeds: f64,
    pub profit: f64,
}

impl PortfolioState {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            balance: initial_balance,
            invested_amount: 0.0,
            reference_price: None,
            cumulative_profit: 0.0,
            last_action: LastAction::None,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn invested_amount(&self) -> f64 {
        self.invested_amount
    }

    pub fn reference_price(&self) -> Option<f64> {
        self.reference_price
    }

    pub fn cumulative_profit(&self) -> f64 {
        self.cumulative_profit
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    /// Cash plus capital currently deployed
    pub fn total_balance(&self) -> f64 {
        self.balance + self.invested_amount
    }

    pub fn is_holding(&self) -> bool {
        self.invested_amount > 0.0
    }

    pub fn has_cash(&self) -> bool {
        self.balance > 0.0
    }

    pub(crate) fn set_reference_price(&mut self, price: f64) {
        self.reference_price = Some(price);
    }

    pub(crate) fn reset_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Move the whole balance into the position at `price`
    ///
    /// Returns the amount now invested.
    pub(crate) fn open(&mut self, price: f64) -> f64 {
        self.invested_amount += self.balance;
        self.balance = 0.0;
        self.reference_price = Some(price);
        self.last_action = LastAction::Buy;
        self.invested_amount
    }

    /// Close the position after a move of `variation_pct` from the reference
    pub(crate) fn close(&mut self, price: f64, variation_pct: f64) -> SellFill {
        let proceeds = self.invested_amount * (1.0 + variation_pct / 100.0);
        let profit = proceeds - self.invested_amount;

        self.balance += proceeds;
        self.cumulative_profit += profit;
        self.invested_amount = 0.0;
        self.reference_price = Some(price);
        self.last_action = LastAction::Sell;

        SellFill { proceeds, profit }
    }
}
