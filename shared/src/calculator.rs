//! Quality-adjusted payment calculation
//!
//! Converts a lot's gross weight, the inspector's measurements and the base
//! price of the selected quality tier into a payable amount:
//!
//! - moisture above the 7.5% ICCO standard is removed by re-inflating the
//!   lot's dry matter to standard moisture
//! - impurities are a flat deduction against the original gross weight
//! - damaged grains beyond 2% cut the price by 5% of base per point

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CalculationError;
use crate::models::{
    PriceList, QualityMeasurement, DAMAGE_PENALTY_RATE, DAMAGE_TOLERANCE_PERCENT,
    STANDARD_MOISTURE_PERCENT,
};
use crate::validation::{validate_base_price, validate_gross_weight};

/// Itemized result of a payment calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResult {
    pub gross_weight: Decimal,
    /// Non-water mass of the lot
    pub dry_matter_weight: Decimal,
    /// Weight the lot would have at standard moisture
    pub adjusted_weight: Decimal,
    pub humidity_discount: Decimal,
    pub impurity_discount: Decimal,
    /// Payable weight after humidity and impurity deductions
    pub net_weight: Decimal,
    pub base_price_per_kg: Decimal,
    /// Damaged grains above the tolerance (percentage points)
    pub excess_damage: Decimal,
    pub damage_penalty_per_kg: Decimal,
    pub final_price_per_kg: Decimal,
    /// Rounded to 2 decimal places
    pub total_payment: Decimal,
}

/// Calculation request as sent by the inspection form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCalculationInput {
    pub gross_weight: Decimal,
    #[serde(flatten)]
    pub measurement: QualityMeasurement,
    pub base_price_per_kg: Decimal,
}

impl PaymentCalculationInput {
    pub fn calculate(&self) -> Result<PaymentResult, CalculationError> {
        calculate_quality_payment(self.gross_weight, &self.measurement, self.base_price_per_kg)
    }
}

/// Calculate the payment for a lot.
///
/// Fails with `InvalidMeasurement` when a reading is outside 0-100%, the gross
/// weight is not positive, the deductions exceed the lot's weight, or the
/// amounts do not fit in a `Decimal`.
pub fn calculate_quality_payment(
    gross_weight: Decimal,
    measurement: &QualityMeasurement,
    base_price_per_kg: Decimal,
) -> Result<PaymentResult, CalculationError> {
    validate_gross_weight(gross_weight)
        .map_err(|reason| CalculationError::invalid_measurement("gross_weight", reason))?;
    measurement.validate()?;
    validate_base_price(base_price_per_kg)
        .map_err(|reason| CalculationError::InvalidBasePrice(reason.to_string()))?;

    let (dry_matter_weight, adjusted_weight) =
        moisture_adjusted_weight(gross_weight, measurement.humidity_percent)?;
    let humidity_discount = gross_weight - adjusted_weight;

    // Always against the original gross weight, not the moisture-adjusted one
    let impurity_discount = gross_weight
        .checked_mul(measurement.impurities_percent / Decimal::ONE_HUNDRED)
        .ok_or_else(|| out_of_range("gross_weight"))?;

    let net_weight = adjusted_weight - impurity_discount;
    if net_weight < Decimal::ZERO {
        return Err(CalculationError::invalid_measurement(
            "impurities_percent",
            "Humidity and impurity deductions exceed the gross weight",
        ));
    }

    let excess_damage =
        (measurement.damaged_grains_percent - DAMAGE_TOLERANCE_PERCENT).max(Decimal::ZERO);
    let damage_penalty_per_kg = base_price_per_kg
        .checked_mul(excess_damage * DAMAGE_PENALTY_RATE)
        .ok_or_else(|| out_of_range("base_price_per_kg"))?;
    let final_price_per_kg = (base_price_per_kg - damage_penalty_per_kg).max(Decimal::ZERO);

    let total_payment = final_price_per_kg
        .checked_mul(net_weight)
        .map(round_currency)
        .ok_or_else(|| out_of_range("gross_weight"))?;

    Ok(PaymentResult {
        gross_weight,
        dry_matter_weight,
        adjusted_weight,
        humidity_discount,
        impurity_discount,
        net_weight,
        base_price_per_kg,
        excess_damage,
        damage_penalty_per_kg,
        final_price_per_kg,
        total_payment,
    })
}

/// Resolve the tier's base price from the price list, then calculate
pub fn calculate_for_tier(
    prices: &PriceList,
    tier_name: &str,
    gross_weight: Decimal,
    measurement: &QualityMeasurement,
) -> Result<PaymentResult, CalculationError> {
    let base_price = prices.base_price_for(tier_name)?;
    calculate_quality_payment(gross_weight, measurement, base_price)
}

/// Returns `(dry_matter_weight, adjusted_weight)` for a humidity reading
fn moisture_adjusted_weight(
    gross_weight: Decimal,
    humidity_percent: Decimal,
) -> Result<(Decimal, Decimal), CalculationError> {
    if humidity_percent <= STANDARD_MOISTURE_PERCENT {
        return Ok((gross_weight, gross_weight));
    }

    let dry_matter = gross_weight
        .checked_mul(Decimal::ONE - humidity_percent / Decimal::ONE_HUNDRED)
        .ok_or_else(|| out_of_range("gross_weight"))?;
    let standard_solids = Decimal::ONE - STANDARD_MOISTURE_PERCENT / Decimal::ONE_HUNDRED;
    // 28-digit division can round a hair above gross for readings just over 7.5%
    let adjusted = dry_matter
        .checked_div(standard_solids)
        .ok_or_else(|| out_of_range("gross_weight"))?
        .min(gross_weight);
    Ok((dry_matter, adjusted))
}

fn out_of_range(field: &str) -> CalculationError {
    CalculationError::invalid_measurement(field, "Value is too large to calculate a payment")
}

/// Round to minor currency units, always carrying two decimal places
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
