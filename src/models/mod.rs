use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single observed price at a point in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PriceSample {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, price }
    }
}

/// Raw rate returned by a price source, before it enters the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceData {
    pub pair: String,
    pub price: f64,
    /// Date the source published the rate for
    pub as_of: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: DataSource,
}

/// Data source identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DataSource {
    Frankfurter,
}

/// Side of an executed trade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "Buy"),
            TradeAction::Sell => write!(f, "Sell"),
        }
    }
}

/// Most recent action taken by the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LastAction {
    #[default]
    None,
    Buy,
    Sell,
}

impl From<TradeAction> for LastAction {
    fn from(action: TradeAction) -> Self {
        match action {
            TradeAction::Buy => LastAction::Buy,
            TradeAction::Sell => LastAction::Sell,
        }
    }
}

impl std::fmt::Display for LastAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastAction::None => write!(f, "None"),
            LastAction::Buy => write!(f, "Buy"),
            LastAction::Sell => write!(f, "Sell"),
        }
    }
}

/// Executed trade, immutable once recorded in the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub action: TradeAction,
    pub price: f64,
    /// Invested amount for a buy, resulting balance for a sell
    pub amount: f64,
    /// Realized profit of this trade (sells only)
    pub profit: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn buy(price: f64, invested: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: TradeAction::Buy,
            price,
            amount: invested,
            profit: None,
            timestamp,
        }
    }

    pub fn sell(price: f64, balance: f64, profit: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: TradeAction::Sell,
            price,
            amount: balance,
            profit: Some(profit),
            timestamp,
        }
    }
}
