use crate::api::FrankfurterClient;
use crate::models::PriceSample;
use crate::Result;

/// Fetches the current rate for one currency pair
/// Simple and stupid - one request, one sample
pub struct PriceFeedManager {
    client: FrankfurterClient,
    base: String,
    quote: String,
}

impl PriceFeedManager {
    pub fn new(client: FrankfurterClient, base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// Display name of the tracked pair, e.g. "EUR/USD"
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    /// Fetch the current price and stamp it with the fetch time
    pub async fn fetch_sample(&self) -> Result<PriceSample> {
        let price_data = self.client.get_rate(&self.base, &self.quote).await?;

        tracing::info!(
            pair = %price_data.pair,
            price = %price_data.price,
            as_of = ?price_data.as_of,
            "Fetched price sample"
        );

        Ok(PriceSample::new(price_data.price, price_data.timestamp))
    }
}
