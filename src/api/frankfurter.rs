use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crate::models::{DataSource, PriceData};

pub const FRANKFURTER_API_BASE: &str = "https://api.frankfurter.dev/v1";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 2000; // Start with 2 seconds
const DEFAULT_RATE_LIMIT_RPM: u32 = 30;

type FrankfurterRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Client for the Frankfurter FX rates API (ECB reference rates)
///
/// Cloneable; all clones share the same rate limiter.
#[derive(Clone)]
pub struct FrankfurterClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    initial_backoff_ms: u64,
    rate_limiter: Arc<FrankfurterRateLimiter>,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[allow(dead_code)]
    base: String,
    date: Option<String>,
    rates: HashMap<String, f64>,
}

impl FrankfurterClient {
    pub fn new() -> Self {
        Self::with_base_url(FRANKFURTER_API_BASE)
    }

    /// Create a client against another host (mirrors, test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            rate_limiter: Arc::new(RateLimiter::direct(Self::quota(DEFAULT_RATE_LIMIT_RPM))),
        }
    }

    /// Override retry count and the first backoff delay
    pub fn with_retry(mut self, max_retries: u32, initial_backoff_ms: u64) -> Self {
        self.max_retries = max_retries.max(1);
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }

    /// Override the number of requests allowed per minute
    pub fn with_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.rate_limiter = Arc::new(RateLimiter::direct(Self::quota(requests_per_minute)));
        self
    }

    fn quota(requests_per_minute: u32) -> Quota {
        Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the latest `base`/`quote` rate
    /// Includes retry logic with exponential backoff for transient failures
    pub async fn get_rate(&self, base: &str, quote: &str) -> Result<PriceData> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            self.rate_limiter.until_ready().await;

            match self.fetch_rate_once(base, quote).await {
                Ok(price_data) => {
                    if attempt > 1 {
                        tracing::info!(
                            "✓ Fetched {}/{} after {} attempts",
                            base,
                            quote,
                            attempt
                        );
                    }
                    return Ok(price_data);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let backoff_ms = self.initial_backoff_ms * 2_u64.pow(attempt - 1);
                        tracing::warn!(
                            "Attempt {}/{} failed for {}/{}: {:#}. Retrying in {}ms...",
                            attempt,
                            self.max_retries,
                            base,
                            quote,
                            e,
                            backoff_ms
                        );
                        sleep(Duration::from_millis(backoff_ms)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("All retry attempts failed")))
    }

    /// Fetch once (without retry logic)
    async fn fetch_rate_once(&self, base: &str, quote: &str) -> Result<PriceData> {
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();
        let url = format!("{}/latest?base={}&symbols={}", self.base_url, base, quote);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Frankfurter returned an error for {}/{}", base, quote))?;

        let body: RatesResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse rate response for {}/{}", base, quote))?;

        let price = body
            .rates
            .get(&quote)
            .copied()
            .ok_or_else(|| anyhow!("No rate found for {} → {}", base, quote))?;

        Ok(PriceData {
            pair: format!("{}/{}", base, quote),
            price,
            as_of: body.date,
            timestamp: Utc::now(),
            source: DataSource::Frankfurter,
        })
    }
}

impl Default for FrankfurterClient {
    fn default() -> Self {
        Self::new()
    }
}
