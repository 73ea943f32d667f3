use crate::models::{TradeAction, Transaction};
use serde::Serialize;

/// Number of buys and sells recorded in a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub buys: usize,
    pub sells: usize,
}

impl ActionCounts {
    pub fn total(&self) -> usize {
        self.buys + self.sells
    }
}

/// Append-only log of executed trades, oldest first
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
    counts: ActionCounts,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, transaction: Transaction) {
        match transaction.action {
            TradeAction::Buy => self.counts.buys += 1,
            TradeAction::Sell => self.counts.sells += 1,
        }
        self.entries.push(transaction);
    }

    pub fn count_by_action(&self) -> ActionCounts {
        self.counts
    }

    /// The `k` most recent transactions, newest first
    pub fn recent(&self, k: usize) -> Vec<Transaction> {
        self.entries.iter().rev().take(k).cloned().collect()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in chronological order
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }
}
