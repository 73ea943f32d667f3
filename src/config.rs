use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::api::FRANKFURTER_API_BASE;

/// Application settings
///
/// Layered as: built-in defaults, then an optional `Settings` file
/// (any format the `config` crate understands), then `FXBOT_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub initial_balance: f64,
    /// Percent move from the reference price that triggers a trade
    pub sensitivity: f64,
    pub poll_interval_secs: u64,
    pub base_currency: String,
    pub quote_currency: String,
    pub api_base_url: String,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load("Settings")
    }

    /// Load from the given settings file stem (missing file is fine)
    pub fn load(settings_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("initial_balance", 1000.0)?
            .set_default("sensitivity", 1.0)?
            .set_default("poll_interval_secs", 5)?
            .set_default("base_currency", "EUR")?
            .set_default("quote_currency", "USD")?
            .set_default("api_base_url", FRANKFURTER_API_BASE)?
            .set_default("max_retries", 3)?
            .set_default("initial_backoff_ms", 2000)?
            .set_default("rate_limit_per_minute", 30)?
            .add_source(File::with_name(settings_file).required(false))
            .add_source(Environment::with_prefix("FXBOT"));

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_balance.is_finite() && self.initial_balance > 0.0) {
            return Err(ConfigError::Message(format!(
                "initial_balance must be positive, got {}",
                self.initial_balance
            )));
        }
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(ConfigError::Message(format!(
                "sensitivity must be positive, got {}",
                self.sensitivity
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Message(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if i64::try_from(self.poll_interval_secs).is_err() {
            return Err(ConfigError::Message(format!(
                "poll_interval_secs is too large, got {}",
                self.poll_interval_secs
            )));
        }
        Ok(())
    }

    /// Display name of the traded pair, e.g. "EUR/USD"
    pub fn pair(&self) -> String {
        format!(
            "{}/{}",
            self.base_currency.to_uppercase(),
            self.quote_currency.to_uppercase()
        )
    }
}
