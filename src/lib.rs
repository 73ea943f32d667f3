// Core modules
pub mod api;
pub mod backtest;
pub mod config;
pub mod error;
pub mod execution;
pub mod indicators;
pub mod models;
pub mod report;
pub mod strategy;

// Re-export commonly used types
pub use error::EngineError;
pub use execution::{TickOutcome, TradingEngine};
pub use models::*;
pub use report::Snapshot;

// Error handling
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
