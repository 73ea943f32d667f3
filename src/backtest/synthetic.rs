use crate::models::PriceSample;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarketScenario {
    /// Slow upward drift with noise
    Uptrend,
    /// Slow downward drift with noise
    Downtrend,
    /// Mean-reverting random walk around the base price
    Sideways,
    /// Large swings (±1.5% per tick)
    Volatile,
}

/// Generates synthetic FX price series for offline replay
pub struct SyntheticDataGenerator {
    rng: StdRng,
    base_price: f64,
}

impl SyntheticDataGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 1.10,
        }
    }

    /// Start the series at another rate level (e.g. 160.0 for USD/JPY)
    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    /// Generate `num_samples` prices spaced `interval_secs` apart, ending now
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        num_samples: usize,
        interval_secs: i64,
    ) -> Vec<PriceSample> {
        let start = Utc::now() - Duration::seconds(num_samples as i64 * interval_secs);
        self.generate_from(scenario, start, num_samples, interval_secs)
    }

    /// Same as [`Self::generate`] with an explicit start time
    pub fn generate_from(
        &mut self,
        scenario: MarketScenario,
        start: DateTime<Utc>,
        num_samples: usize,
        interval_secs: i64,
    ) -> Vec<PriceSample> {
        let mut samples = Vec::with_capacity(num_samples);
        let mut price = self.base_price;

        for i in 0..num_samples {
            let timestamp = start + Duration::seconds(i as i64 * interval_secs);

            let step = match scenario {
                MarketScenario::Uptrend => 0.0005 + self.rng.gen_range(-0.002..0.002),
                MarketScenario::Downtrend => -0.0005 + self.rng.gen_range(-0.002..0.002),
                MarketScenario::Sideways => {
                    // Pull back toward the base price
                    let pull = (self.base_price - price) / self.base_price * 0.2;
                    pull + self.rng.gen_range(-0.006..0.006)
                }
                MarketScenario::Volatile => self.rng.gen_range(-0.015..0.015),
            };

            price *= 1.0 + step;
            // Keep the series strictly positive
            price = price.max(self.base_price * 0.01);

            samples.push(PriceSample::new(price, timestamp));
        }

        samples
    }
}
