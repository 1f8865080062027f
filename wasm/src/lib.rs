//! WebAssembly module for AgroSync
//!
//! Lets the quality inspection form compute the payment breakdown in the
//! browser with the same calculator the server uses. The form decides when
//! to call it (on blur, on a "calculate" button); nothing recomputes
//! implicitly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::calculator::*;
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("AgroSync quality calculator loaded"));
}

/// Calculate the quality-adjusted payment.
///
/// Takes a JSON object with `gross_weight`, `humidity_percent`,
/// `impurities_percent`, `damaged_grains_percent` and `base_price_per_kg`,
/// and returns the itemized `PaymentResult` as JSON.
#[wasm_bindgen]
pub fn calculate_quality_payment_json(input_json: &str) -> Result<String, JsValue> {
    calculate_from_json(input_json).map_err(|e| JsValue::from_str(&e))
}

fn calculate_from_json(input_json: &str) -> Result<String, String> {
    let input: PaymentCalculationInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;

    let result = input.calculate().map_err(|e| e.to_string())?;

    serde_json::to_string(&result).map_err(|e| format!("Failed to encode result: {}", e))
}

/// Convert wet ("baba") cocoa weight to its dry-weight equivalent.
///
/// Errors for NaN, infinite or non-positive weights.
#[wasm_bindgen]
pub fn convert_fresh_to_dry(fresh_weight: f64) -> Result<f64, JsValue> {
    fresh_to_dry(fresh_weight).map_err(|e| JsValue::from_str(&e))
}

fn fresh_to_dry(fresh_weight: f64) -> Result<f64, String> {
    let weight = Decimal::try_from(fresh_weight)
        .map_err(|_| format!("Invalid fresh weight: {}", fresh_weight))?;
    validate_gross_weight(weight).map_err(|reason| reason.to_string())?;

    let lot = DeliveryLot::from_scale(ProductState::Fresh, weight);
    lot.gross_weight
        .to_f64()
        .ok_or_else(|| format!("Dry weight {} cannot be represented", lot.gross_weight))
}

/// Whether a humidity reading is at or below the 7.5% standard
#[wasm_bindgen]
pub fn is_humidity_within_standard(humidity: f64) -> bool {
    Decimal::try_from(humidity)
        .map(is_within_moisture_standard)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_from_json() {
        let output = calculate_from_json(
            r#"{
                "gross_weight": "100",
                "humidity_percent": "7.5",
                "impurities_percent": "0",
                "damaged_grains_percent": "12",
                "base_price_per_kg": "10.00"
            }"#,
        )
        .unwrap();

        let result: PaymentResult = serde_json::from_str(&output).unwrap();
        assert_eq!(result.total_payment, Decimal::new(50000, 2));
        assert_eq!(result.final_price_per_kg, Decimal::from(5));
    }

    #[test]
    fn test_calculate_from_json_rejects_missing_reading() {
        let err = calculate_from_json(
            r#"{
                "gross_weight": "100",
                "humidity_percent": "7.5",
                "impurities_percent": "0",
                "base_price_per_kg": "10.00"
            }"#,
        )
        .unwrap_err();
        assert!(err.starts_with("Invalid input JSON"));
    }

    #[test]
    fn test_calculate_from_json_rejects_out_of_range() {
        let err = calculate_from_json(
            r#"{
                "gross_weight": "100",
                "humidity_percent": "150",
                "impurities_percent": "0",
                "damaged_grains_percent": "0",
                "base_price_per_kg": "10.00"
            }"#,
        )
        .unwrap_err();
        assert!(err.contains("humidity_percent"));
    }

    #[test]
    fn test_calculate_from_json_reports_overflow() {
        let err = calculate_from_json(
            r#"{
                "gross_weight": "100000000000000000000",
                "humidity_percent": "7",
                "impurities_percent": "0",
                "damaged_grains_percent": "0",
                "base_price_per_kg": "10000000000"
            }"#,
        )
        .unwrap_err();
        assert!(err.contains("too large"));
    }

    #[test]
    fn test_fresh_to_dry() {
        assert!((fresh_to_dry(300.0).unwrap() - 114.0).abs() < 0.001);
    }

    #[test]
    fn test_fresh_to_dry_rejects_non_numeric_weights() {
        assert!(fresh_to_dry(f64::NAN).is_err());
        assert!(fresh_to_dry(f64::INFINITY).is_err());
        assert!(fresh_to_dry(0.0).is_err());
        assert!(fresh_to_dry(-12.5).is_err());
    }

    #[test]
    fn test_humidity_standard() {
        assert!(is_humidity_within_standard(7.5));
        assert!(!is_humidity_within_standard(8.0));
    }
}
