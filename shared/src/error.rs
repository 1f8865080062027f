//! Errors raised by the quality payment calculator

use thiserror::Error;

/// Reasons the calculator refuses to produce a payment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// A measurement or weight is missing, out of range, or leads to a negative net weight
    #[error("Invalid measurement for {field}: {reason}")]
    InvalidMeasurement { field: String, reason: String },

    /// Base price per kilogram is negative
    #[error("Invalid base price: {0}")]
    InvalidBasePrice(String),

    /// No quality tier with this name exists in the price list
    #[error("Unknown quality tier: {0}")]
    UnknownQualityTier(String),
}

impl CalculationError {
    pub fn invalid_measurement(field: &str, reason: impl Into<String>) -> Self {
        CalculationError::InvalidMeasurement {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Field name for measurement errors, used when rendering API errors
    pub fn field(&self) -> Option<&str> {
        match self {
            CalculationError::InvalidMeasurement { field, .. } => Some(field),
            CalculationError::InvalidBasePrice(_) => Some("base_price_per_kg"),
            CalculationError::UnknownQualityTier(_) => Some("quality"),
        }
    }
}
