// Session state, trade execution and price collection
pub mod engine;
pub mod ledger;
pub mod portfolio;
pub mod price_feed;
pub mod price_window;

pub use engine::{TickOutcome, TradingEngine};
pub use ledger::{ActionCounts, TransactionLedger};
pub use portfolio::{PortfolioState, SellFill};
pub use price_feed::PriceFeedManager;
pub use price_window::{PriceWindow, WINDOW_CAPACITY};
