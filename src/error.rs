use thiserror::Error;

/// Errors reported synchronously at the engine boundary.
///
/// Every variant is raised before any state is touched, so the caller can
/// skip the tick or surface the failure without the session being corrupted.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid price sample: {price} (must be finite and positive)")]
    InvalidSample { price: f64 },

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Check that a configuration value is finite and strictly positive
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::Configuration(format!(
            "{} must be a finite positive number, got {}",
            name, value
        )))
    }
}
