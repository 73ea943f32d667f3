//! Market KPIs derived from the rolling price window
//!
//! All three figures are built from the percentage change between each
//! sample and the one before it (oldest to newest).

use crate::execution::PriceWindow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketKpis {
    /// Sample standard deviation of percentage changes
    pub volatility: f64,
    /// Mean percentage change (positive = rising)
    pub trend: f64,
    /// Sum of absolute percentage changes, a churn proxy
    pub volume: f64,
}

/// Compute KPIs for a window
///
/// Returns None when the window holds fewer than 2 samples, so "not enough
/// data" is never confused with a flat market.
pub fn compute_kpis(window: &PriceWindow) -> Option<MarketKpis> {
    if window.len() < 2 {
        return None;
    }

    let prices: Vec<f64> = window.chronological().map(|s| s.price).collect();
    let changes = percentage_changes(&prices);

    if changes.is_empty() {
        return None;
    }

    let n = changes.len() as f64;
    let trend = changes.iter().sum::<f64>() / n;
    let volume = changes.iter().map(|c| c.abs()).sum::<f64>();

    // n-1 deviation is undefined for a single change
    let volatility = if changes.len() > 1 {
        let variance = changes.iter().map(|c| (c - trend).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    // Sums of huge but finite changes can still overflow
    if !(volatility.is_finite() && trend.is_finite() && volume.is_finite()) {
        return None;
    }

    Some(MarketKpis {
        volatility,
        trend,
        volume,
    })
}

/// Percentage changes between consecutive prices, scaled by 100
///
/// Pairs whose previous price is zero or not finite, or whose change
/// overflows, are skipped.
fn percentage_changes(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
                return None;
            }
            let change = (curr - prev) / prev * 100.0;
            change.is_finite().then_some(change)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSample;
    use chrono::{Duration, Utc};

    fn window_of(prices: &[f64]) -> PriceWindow {
        let start = Utc::now();
        let mut window = PriceWindow::new();
        for (i, &p) in prices.iter().enumerate() {
            window.push(PriceSample::new(p, start + Duration::seconds(i as i64)));
        }
        window
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_and_single_sample_are_absent() {
        assert_eq!(compute_kpis(&window_of(&[])), None);
        assert_eq!(compute_kpis(&window_of(&[1.10])), None);
    }

    #[test]
    fn test_two_samples_are_finite() {
        let kpis = compute_kpis(&window_of(&[100.0, 101.0])).unwrap();

        assert!(approx(kpis.trend, 1.0));
        assert!(approx(kpis.volume, 1.0));
        assert_eq!(kpis.volatility, 0.0);
    }

    #[test]
    fn test_flat_market_is_zero_not_absent() {
        let kpis = compute_kpis(&window_of(&[1.0, 1.0, 1.0])).unwrap();

        assert_eq!(kpis.trend, 0.0);
        assert_eq!(kpis.volume, 0.0);
        assert_eq!(kpis.volatility, 0.0);
    }

    #[test]
    fn test_known_values() {
        // Changes: +10%, -10%
        let kpis = compute_kpis(&window_of(&[100.0, 110.0, 99.0])).unwrap();

        assert!(approx(kpis.trend, 0.0));
        assert!(approx(kpis.volume, 20.0));
        // Sample std of [10, -10] with n-1 = 1
        assert!(approx(kpis.volatility, 200.0_f64.sqrt()));
    }

    #[test]
    fn test_trend_sign_follows_direction() {
        let rising = compute_kpis(&window_of(&[1.00, 1.01, 1.02, 1.03])).unwrap();
        let falling = compute_kpis(&window_of(&[1.03, 1.02, 1.01, 1.00])).unwrap();

        assert!(rising.trend > 0.0);
        assert!(falling.trend < 0.0);
        assert!(rising.volume > 0.0 && falling.volume > 0.0);
    }

    #[test]
    fn test_overflowing_change_is_skipped() {
        let changes = percentage_changes(&[1e-300, 1e300, 1e300]);
        assert_eq!(changes, vec![0.0]);

        let kpis = compute_kpis(&window_of(&[1e-300, 1e300, 1e300])).unwrap();
        assert_eq!(kpis.trend, 0.0);
        assert_eq!(kpis.volume, 0.0);
        assert_eq!(kpis.volatility, 0.0);

        assert_eq!(compute_kpis(&window_of(&[1e-300, 1e300])), None);
    }

    #[test]
    fn test_zero_previous_price_is_skipped() {
        let changes = percentage_changes(&[0.0, 1.0, 1.1]);
        assert_eq!(changes.len(), 1);
        assert!(approx(changes[0], 10.0));

        assert!(percentage_changes(&[0.0, 1.0]).is_empty());
    }
}
