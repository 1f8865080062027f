//! Quality inspection measurements

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalculationError;
use crate::validation::validate_percentage;

/// ICCO standard moisture content (%) every lot is normalized to
pub const STANDARD_MOISTURE_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 1);

/// Damaged grains (%) tolerated before the price penalty applies
pub const DAMAGE_TOLERANCE_PERCENT: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Price reduction per percentage point of excess damage (5% of base price)
pub const DAMAGE_PENALTY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Measurements taken by an inspector on a delivered lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityMeasurement {
    /// Moisture content (%)
    pub humidity_percent: Decimal,
    /// Foreign matter (%)
    pub impurities_percent: Decimal,
    pub damaged_grains_percent: Decimal,
}

impl QualityMeasurement {
    /// Build a measurement, rejecting any reading outside 0-100%
    pub fn new(
        humidity_percent: Decimal,
        impurities_percent: Decimal,
        damaged_grains_percent: Decimal,
    ) -> Result<Self, CalculationError> {
        let measurement = Self {
            humidity_percent,
            impurities_percent,
            damaged_grains_percent,
        };
        measurement.validate()?;
        Ok(measurement)
    }

    /// Check every reading is a valid percentage
    pub fn validate(&self) -> Result<(), CalculationError> {
        for (field, value) in [
            ("humidity_percent", self.humidity_percent),
            ("impurities_percent", self.impurities_percent),
            ("damaged_grains_percent", self.damaged_grains_percent),
        ] {
            validate_percentage(value)
                .map_err(|reason| CalculationError::invalid_measurement(field, reason))?;
        }
        Ok(())
    }
}

/// Measurements as entered on the inspection form.
///
/// `None` means the inspector has not filled the field yet, which is
/// different from an entered zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityMeasurementInput {
    pub humidity_percent: Option<Decimal>,
    pub impurities_percent: Option<Decimal>,
    pub damaged_grains_percent: Option<Decimal>,
}

impl TryFrom<QualityMeasurementInput> for QualityMeasurement {
    type Error = CalculationError;

    fn try_from(input: QualityMeasurementInput) -> Result<Self, Self::Error> {
        let humidity = require(input.humidity_percent, "humidity_percent")?;
        let impurities = require(input.impurities_percent, "impurities_percent")?;
        let damaged = require(input.damaged_grains_percent, "damaged_grains_percent")?;
        QualityMeasurement::new(humidity, impurities, damaged)
    }
}

fn require(value: Option<Decimal>, field: &str) -> Result<Decimal, CalculationError> {
    value.ok_or_else(|| CalculationError::invalid_measurement(field, "Measurement not entered"))
}
