//! Validation utilities for AgroSync quality control
//!
//! Range checks return `&'static str` reasons so callers can wrap them in
//! their own error types.

use rust_decimal::Decimal;

use crate::models::STANDARD_MOISTURE_PERCENT;

// ============================================================================
// Quality Measurement Validations
// ============================================================================

/// Validate a percentage reading is within 0-100
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Percentage cannot be negative");
    }
    if value > Decimal::ONE_HUNDRED {
        return Err("Percentage cannot exceed 100");
    }
    Ok(())
}

/// Validate gross weight received at the collection point
pub fn validate_gross_weight(weight: Decimal) -> Result<(), &'static str> {
    if weight <= Decimal::ZERO {
        return Err("Gross weight must be positive");
    }
    Ok(())
}

/// Validate a quality tier base price
pub fn validate_base_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Base price cannot be negative");
    }
    Ok(())
}

/// Check whether humidity is at or below the ICCO 7.5% standard
pub fn is_within_moisture_standard(humidity: Decimal) -> bool {
    humidity <= STANDARD_MOISTURE_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_percentage_bounds() {
        assert!(validate_percentage(Decimal::ZERO).is_ok());
        assert!(validate_percentage(Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_percentage(Decimal::new(755, 1)).is_ok());
        assert!(validate_percentage(Decimal::new(-1, 1)).is_err());
        assert!(validate_percentage(Decimal::new(1001, 1)).is_err());
    }

    #[test]
    fn test_validate_gross_weight() {
        assert!(validate_gross_weight(Decimal::from(150)).is_ok());
        assert!(validate_gross_weight(Decimal::ZERO).is_err());
        assert!(validate_gross_weight(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_base_price() {
        assert!(validate_base_price(Decimal::ZERO).is_ok());
        assert!(validate_base_price(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_moisture_standard_boundary() {
        assert!(is_within_moisture_standard(Decimal::new(75, 1)));
        assert!(!is_within_moisture_standard(Decimal::new(751, 2)));
    }
}
