pub mod frankfurter;

pub use frankfurter::{FrankfurterClient, FRANKFURTER_API_BASE};
