//! Quality payment tests for AgroSync
//!
//! Covers the payment calculator used by quality control: weight and price
//! monotonicity, the no-deduction identity, impurity deduction against gross
//! weight, currency rounding, and the reference inspection scenarios.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    calculate_for_tier, calculate_quality_payment, CalculationError, DeliveryLot, PriceList,
    ProductState, QualityMeasurement, QualityMeasurementInput, QualityTier,
};
use std::str::FromStr;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn measurement(humidity: &str, impurities: &str, damaged: &str) -> QualityMeasurement {
    QualityMeasurement::new(dec(humidity), dec(impurities), dec(damaged)).unwrap()
}

// ============================================================================
// Strategies
// ============================================================================

/// Gross weight between 0.1 kg and 10,000 kg
fn gross_weight_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000).prop_map(|n| Decimal::new(n, 1))
}

/// Percentage with two decimals within [0, max]
fn percent_strategy(max: i64) -> impl Strategy<Value = Decimal> {
    (0i64..=max * 100).prop_map(|n| Decimal::new(n, 2))
}

/// Base price between 0.00 and 50.00 per kg
fn base_price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=5_000).prop_map(|n| Decimal::new(n, 2))
}

// ============================================================================
// Reference scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn scenario_a_standard_moisture_no_deductions() {
        let result =
            calculate_quality_payment(dec("500"), &measurement("7.5", "0", "0"), dec("9.00"))
                .unwrap();
        assert_eq!(result.net_weight, dec("500.00"));
        assert_eq!(result.final_price_per_kg, dec("9.00"));
        assert_eq!(result.total_payment, dec("4500.00"));
    }

    #[test]
    fn scenario_b_humidity_above_standard() {
        let result =
            calculate_quality_payment(dec("150"), &measurement("10", "0", "0"), dec("8.50"))
                .unwrap();
        assert_eq!(result.dry_matter_weight, dec("135"));
        assert_eq!(result.adjusted_weight.round_dp(4), dec("145.9459"));
        assert_eq!(result.humidity_discount.round_dp(3), dec("4.054"));
        assert_eq!(result.net_weight.round_dp(3), dec("145.946"));
        assert_eq!(result.final_price_per_kg, dec("8.50"));
        assert_eq!(result.total_payment, dec("1240.54"));
    }

    #[test]
    fn scenario_c_impurities() {
        let result =
            calculate_quality_payment(dec("200"), &measurement("7.5", "5", "0"), dec("8.80"))
                .unwrap();
        assert_eq!(result.impurity_discount, dec("10"));
        assert_eq!(result.net_weight, dec("190"));
        assert_eq!(result.final_price_per_kg, dec("8.80"));
        assert_eq!(result.total_payment, dec("1672.00"));
    }

    #[test]
    fn scenario_d_damage_penalty() {
        let result =
            calculate_quality_payment(dec("100"), &measurement("7.5", "0", "12"), dec("10.00"))
                .unwrap();
        assert_eq!(result.excess_damage, dec("10"));
        assert_eq!(result.damage_penalty_per_kg, dec("5.00"));
        assert_eq!(result.final_price_per_kg, dec("5.00"));
        assert_eq!(result.net_weight, dec("100"));
        assert_eq!(result.total_payment, dec("500.00"));
    }

    #[test]
    fn scenario_e_humidity_out_of_range() {
        let invalid = QualityMeasurement {
            humidity_percent: dec("150"),
            impurities_percent: Decimal::ZERO,
            damaged_grains_percent: Decimal::ZERO,
        };
        let err = calculate_quality_payment(dec("100"), &invalid, dec("10")).unwrap_err();
        assert!(matches!(
            err,
            CalculationError::InvalidMeasurement { ref field, .. } if field == "humidity_percent"
        ));
    }

    #[test]
    fn combined_deductions_and_penalty() {
        // 1000 kg at 12% humidity, 3% impurities, 4% damage, base 10.00
        // dry matter 880, adjusted 951.35..., impurities 30, net 921.35...
        // price 10 - 10 × 2 × 0.05 = 9.00
        let result =
            calculate_quality_payment(dec("1000"), &measurement("12", "3", "4"), dec("10.00"))
                .unwrap();
        assert_eq!(result.dry_matter_weight, dec("880"));
        assert_eq!(result.impurity_discount, dec("30"));
        assert_eq!(result.net_weight.round_dp(2), dec("921.35"));
        assert_eq!(result.final_price_per_kg, dec("9.00"));
        assert_eq!(result.total_payment, dec("8292.16"));
    }
}

// ============================================================================
// Input handling
// ============================================================================

mod inputs {
    use super::*;

    #[test]
    fn missing_reading_is_rejected_not_zeroed() {
        let input = QualityMeasurementInput {
            humidity_percent: Some(dec("8")),
            impurities_percent: None,
            damaged_grains_percent: Some(dec("1")),
        };
        let err = QualityMeasurement::try_from(input).unwrap_err();
        assert_eq!(err.field(), Some("impurities_percent"));
    }

    #[test]
    fn negative_net_weight_is_invalid() {
        let err = calculate_quality_payment(dec("50"), &measurement("95", "20", "0"), dec("9"))
            .unwrap_err();
        assert!(matches!(err, CalculationError::InvalidMeasurement { .. }));
    }

    #[test]
    fn zero_gross_weight_is_invalid() {
        let err = calculate_quality_payment(Decimal::ZERO, &measurement("7", "0", "0"), dec("9"))
            .unwrap_err();
        assert_eq!(err.field(), Some("gross_weight"));
    }

    #[test]
    fn unknown_tier_never_prices_at_zero() {
        let prices = PriceList::new(vec![QualityTier::new("Premium", dec("12.00"))]);
        let err = calculate_for_tier(&prices, "Básica", dec("100"), &measurement("7", "0", "0"))
            .unwrap_err();
        assert_eq!(err, CalculationError::UnknownQualityTier("Básica".to_string()));
    }

    #[test]
    fn fresh_lot_is_priced_on_dry_equivalent() {
        // 300 kg of wet cocoa → 114 kg dry equivalent
        let lot = DeliveryLot::from_scale(ProductState::Fresh, dec("300"));
        let prices = PriceList::default_tiers();
        let result =
            calculate_for_tier(&prices, "Estándar", lot.gross_weight, &measurement("7", "0", "0"))
                .unwrap();
        assert_eq!(result.net_weight, dec("114"));
        assert_eq!(result.total_payment, dec("1026.00"));
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Net weight never exceeds gross weight
        #[test]
        fn prop_net_weight_not_above_gross(
            gross in gross_weight_strategy(),
            humidity in percent_strategy(60),
            impurities in percent_strategy(30),
            damaged in percent_strategy(100),
            base in base_price_strategy(),
        ) {
            let m = QualityMeasurement::new(humidity, impurities, damaged).unwrap();
            let result = calculate_quality_payment(gross, &m, base).unwrap();
            prop_assert!(result.net_weight <= gross,
                "net {} exceeds gross {}", result.net_weight, gross);
            prop_assert!(result.net_weight >= Decimal::ZERO);
        }

        /// Final price never exceeds base price and is never negative
        #[test]
        fn prop_price_not_above_base(
            gross in gross_weight_strategy(),
            damaged in percent_strategy(100),
            base in base_price_strategy(),
        ) {
            let m = QualityMeasurement::new(dec("7.5"), Decimal::ZERO, damaged).unwrap();
            let result = calculate_quality_payment(gross, &m, base).unwrap();
            prop_assert!(result.final_price_per_kg <= base);
            prop_assert!(result.final_price_per_kg >= Decimal::ZERO);
        }

        /// Lots within every tolerance keep their weight and base price
        #[test]
        fn prop_no_deduction_identity(
            gross in gross_weight_strategy(),
            humidity in (0i64..=750).prop_map(|n| Decimal::new(n, 2)),
            damaged in (0i64..=200).prop_map(|n| Decimal::new(n, 2)),
            base in base_price_strategy(),
        ) {
            let m = QualityMeasurement::new(humidity, Decimal::ZERO, damaged).unwrap();
            let result = calculate_quality_payment(gross, &m, base).unwrap();
            prop_assert_eq!(result.net_weight, gross);
            prop_assert_eq!(result.final_price_per_kg, base);
            prop_assert_eq!(result.humidity_discount, Decimal::ZERO);
        }

        /// Impurity deduction is taken from gross weight whatever the humidity
        #[test]
        fn prop_impurities_against_gross(
            gross in gross_weight_strategy(),
            humidity in percent_strategy(60),
            impurities in percent_strategy(30),
        ) {
            let m = QualityMeasurement::new(humidity, impurities, Decimal::ZERO).unwrap();
            let result = calculate_quality_payment(gross, &m, dec("9.00")).unwrap();
            prop_assert_eq!(result.impurity_discount, gross * impurities / Decimal::from(100));
            prop_assert_eq!(result.net_weight, result.adjusted_weight - result.impurity_discount);
        }

        /// Total payment always carries exactly two decimal places
        #[test]
        fn prop_total_rounded_to_cents(
            gross in gross_weight_strategy(),
            humidity in percent_strategy(60),
            impurities in percent_strategy(30),
            damaged in percent_strategy(100),
            base in base_price_strategy(),
        ) {
            let m = QualityMeasurement::new(humidity, impurities, damaged).unwrap();
            let result = calculate_quality_payment(gross, &m, base).unwrap();
            prop_assert_eq!(result.total_payment.scale(), 2);
            let exact = result.final_price_per_kg * result.net_weight;
            prop_assert!((result.total_payment - exact).abs() <= dec("0.005"));
        }

        /// Out-of-range readings are always refused
        #[test]
        fn prop_out_of_range_rejected(
            gross in gross_weight_strategy(),
            excess in (1i64..=10_000).prop_map(|n| Decimal::new(n, 2)),
        ) {
            let m = QualityMeasurement {
                humidity_percent: Decimal::from(100) + excess,
                impurities_percent: Decimal::ZERO,
                damaged_grains_percent: Decimal::ZERO,
            };
            let is_invalid = matches!(
                calculate_quality_payment(gross, &m, dec("9.00")),
                Err(CalculationError::InvalidMeasurement { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
