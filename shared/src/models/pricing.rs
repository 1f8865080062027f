//! Quality tier pricing models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

/// Named price bracket with an administrator-set base price per kg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityTier {
    /// Tier name, e.g. "Premium" or "Estándar"
    pub name: String,
    pub base_price: Decimal,
}

impl QualityTier {
    pub fn new(name: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            name: name.into(),
            base_price,
        }
    }
}

/// Price list used to resolve the tier an inspector selects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceList {
    tiers: Vec<QualityTier>,
}

impl PriceList {
    pub fn new(tiers: Vec<QualityTier>) -> Self {
        Self { tiers }
    }

    /// Tiers seeded on a fresh installation
    pub fn default_tiers() -> Self {
        Self::new(vec![
            QualityTier::new("Premium", Decimal::new(1200, 2)),
            QualityTier::new("Estándar", Decimal::new(900, 2)),
            QualityTier::new("Regular", Decimal::new(700, 2)),
            QualityTier::new("Bajo", Decimal::new(500, 2)),
        ])
    }

    pub fn tiers(&self) -> &[QualityTier] {
        &self.tiers
    }

    /// Find a tier by exact name (surrounding whitespace ignored)
    pub fn find(&self, name: &str) -> Option<&QualityTier> {
        let name = name.trim();
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Resolve the base price for a tier.
    ///
    /// A miss is an error rather than a zero price, so an unresolved tier
    /// can never produce a free lot.
    pub fn base_price_for(&self, name: &str) -> Result<Decimal, CalculationError> {
        self.find(name)
            .map(|t| t.base_price)
            .ok_or_else(|| CalculationError::UnknownQualityTier(name.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let prices = PriceList::default_tiers();
        assert_eq!(prices.base_price_for("Premium").unwrap(), Decimal::from(12));
        assert_eq!(prices.base_price_for(" Estándar ").unwrap(), Decimal::from(9));
    }

    #[test]
    fn test_unknown_tier() {
        let prices = PriceList::default_tiers();
        assert_eq!(
            prices.base_price_for("Deficiente"),
            Err(CalculationError::UnknownQualityTier("Deficiente".to_string()))
        );
    }

    #[test]
    fn test_empty_price_list() {
        let prices = PriceList::default();
        assert!(prices.base_price_for("Premium").is_err());
    }
}
