pub mod runner;
pub mod synthetic;

pub use runner::{ReplayRunner, ReplaySummary};
pub use synthetic::{MarketScenario, SyntheticDataGenerator};
