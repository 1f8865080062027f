//! Delivery lot models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dry-weight yield of fresh ("baba") cocoa
pub const FRESH_TO_DRY_FACTOR: Decimal = Decimal::from_parts(38, 0, 0, false, 2);

/// State of the product when it reaches the collection point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProductState {
    /// Wet cocoa still in pulp
    #[serde(rename = "baba")]
    Fresh,
    #[default]
    #[serde(rename = "seco")]
    Dry,
}

impl ProductState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductState::Fresh => "baba",
            ProductState::Dry => "seco",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "baba" => ProductState::Fresh,
            _ => ProductState::Dry,
        }
    }
}

/// Workflow status of a delivery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Calidad")]
    InQualityReview,
    #[serde(rename = "Almacenado")]
    Stored,
    #[serde(rename = "Rechazado")]
    Rejected,
    #[serde(rename = "Completado")]
    Completed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pendiente",
            DeliveryStatus::InQualityReview => "En Calidad",
            DeliveryStatus::Stored => "Almacenado",
            DeliveryStatus::Rejected => "Rechazado",
            DeliveryStatus::Completed => "Completado",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "Pendiente" => Some(DeliveryStatus::Pending),
            "En Calidad" => Some(DeliveryStatus::InQualityReview),
            "Almacenado" => Some(DeliveryStatus::Stored),
            "Rechazado" => Some(DeliveryStatus::Rejected),
            "Completado" => Some(DeliveryStatus::Completed),
            _ => None,
        }
    }

    /// Only lots not yet evaluated can receive a quality evaluation
    pub fn can_be_evaluated(&self) -> bool {
        matches!(
            self,
            DeliveryStatus::Pending | DeliveryStatus::InQualityReview
        )
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights recorded for a delivered lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryLot {
    pub product_state: ProductState,
    /// Weight as placed on the scale, only kept for fresh lots
    pub weight_fresh: Option<Decimal>,
    /// Dry-weight equivalent the calculator works with
    pub gross_weight: Decimal,
}

impl DeliveryLot {
    /// Normalize a scale reading to dry-weight equivalent
    pub fn from_scale(product_state: ProductState, scale_weight: Decimal) -> Self {
        match product_state {
            ProductState::Fresh => Self {
                product_state,
                weight_fresh: Some(scale_weight),
                gross_weight: scale_weight * FRESH_TO_DRY_FACTOR,
            },
            ProductState::Dry => Self {
                product_state,
                weight_fresh: None,
                gross_weight: scale_weight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_cocoa_is_normalized() {
        let lot = DeliveryLot::from_scale(ProductState::Fresh, Decimal::from(300));
        assert_eq!(lot.gross_weight, Decimal::from(114));
        assert_eq!(lot.weight_fresh, Some(Decimal::from(300)));
    }

    #[test]
    fn test_dry_cocoa_passes_through() {
        let lot = DeliveryLot::from_scale(ProductState::Dry, Decimal::from(120));
        assert_eq!(lot.gross_weight, Decimal::from(120));
        assert_eq!(lot.weight_fresh, None);
    }

    #[test]
    fn test_status_round_trip_with_db_strings() {
        for status in [
            DeliveryStatus::Pending,
            DeliveryStatus::InQualityReview,
            DeliveryStatus::Stored,
            DeliveryStatus::Rejected,
            DeliveryStatus::Completed,
        ] {
            assert_eq!(DeliveryStatus::from_db(status.as_str()), Some(status));
        }
        assert_eq!(DeliveryStatus::from_db("Aprobado"), None);
    }

    #[test]
    fn test_only_open_lots_can_be_evaluated() {
        assert!(DeliveryStatus::Pending.can_be_evaluated());
        assert!(DeliveryStatus::InQualityReview.can_be_evaluated());
        assert!(!DeliveryStatus::Stored.can_be_evaluated());
        assert!(!DeliveryStatus::Rejected.can_be_evaluated());
    }

    #[test]
    fn test_product_state_serde_names() {
        let json = serde_json::to_string(&ProductState::Fresh).unwrap();
        assert_eq!(json, "\"baba\"");
        let state: ProductState = serde_json::from_str("\"seco\"").unwrap();
        assert_eq!(state, ProductState::Dry);
    }
}
