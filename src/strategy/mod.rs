// Trading decision rules
pub mod threshold;

pub use threshold::{Decision, ThresholdReversion};
