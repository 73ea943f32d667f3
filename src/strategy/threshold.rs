use crate::error::{ensure_positive, EngineError};

/// Outcome of evaluating one price against the reference price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// No reference price yet; the current price becomes the reference
    Bootstrap,
    Buy { variation_pct: f64 },
    Sell { variation_pct: f64 },
    Hold { variation_pct: f64 },
}

impl Decision {
    pub fn variation_pct(&self) -> Option<f64> {
        match *self {
            Decision::Bootstrap => None,
            Decision::Buy { variation_pct }
            | Decision::Sell { variation_pct }
            | Decision::Hold { variation_pct } => Some(variation_pct),
        }
    }
}

/// Threshold mean-reversion rule
///
/// Buys once the price has fallen `sensitivity` percent below the reference
/// price and sells once it has risen `sensitivity` percent above it. The
/// reference is the last executed trade price, so the rule is symmetric
/// around the most recent trade.
///
/// Since `sensitivity` is strictly positive, the buy and sell conditions
/// can never both hold for the same price.
#[derive(Debug, Clone)]
pub struct ThresholdReversion {
    sensitivity: f64,
}

impl ThresholdReversion {
    pub fn new(sensitivity: f64) -> Result<Self, EngineError> {
        Ok(Self {
            sensitivity: ensure_positive("sensitivity", sensitivity)?,
        })
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) -> Result<(), EngineError> {
        self.sensitivity = ensure_positive("sensitivity", sensitivity)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        "Threshold Reversion"
    }

    /// Decide what to do at `current_price` given the reference price
    pub fn decide(&self, current_price: f64, reference_price: Option<f64>) -> Decision {
        let reference = match reference_price {
            Some(reference) => reference,
            None => return Decision::Bootstrap,
        };

        let variation_pct = (current_price - reference) / reference * 100.0;

        tracing::debug!(
            "{} check: price={:.6} reference={:.6} variation={:+.4}% (±{}%)",
            self.name(),
            current_price,
            reference,
            variation_pct,
            self.sensitivity
        );

        if variation_pct <= -self.sensitivity {
            Decision::Buy { variation_pct }
        } else if variation_pct >= self.sensitivity {
            Decision::Sell { variation_pct }
        } else {
            Decision::Hold { variation_pct }
        }
    }
}
