// Market indicators derived from the price window

pub mod market_kpis;

pub use market_kpis::{compute_kpis, MarketKpis};
