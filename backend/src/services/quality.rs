//! Quality control service
//!
//! Runs the quality payment calculator against the price list and persists
//! inspector evaluations onto deliveries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::delivery::{DeliveryRecord, DeliveryRow, DELIVERY_COLUMNS};
use crate::services::payment::{PaymentRecord, PaymentService};
use crate::services::pricing::PricingService;
use crate::services::warehouse::WarehouseService;
use shared::{
    calculate_for_tier, calculate_quality_payment, DeliveryLot, DeliveryStatus, PaymentResult,
    ProductState, QualityMeasurement, QualityMeasurementInput,
};

#[derive(Clone)]
pub struct QualityService {
    db: PgPool,
}

/// Input for a payment preview that is not persisted
#[derive(Debug, Deserialize, Validate)]
pub struct CalculatePaymentInput {
    #[validate(length(min = 1, max = 100))]
    pub quality: String,
    /// Scale reading, normalized to dry weight according to `product_state`
    pub gross_weight: Decimal,
    #[serde(default)]
    pub product_state: ProductState,
    #[serde(flatten)]
    pub measurements: QualityMeasurementInput,
}

/// Inspector decision on a delivered lot
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationDecision {
    Approve,
    Reject,
}

/// Input for evaluating a delivery
#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateDeliveryInput {
    pub decision: EvaluationDecision,
    /// Required when approving
    #[validate(length(min = 1, max = 100))]
    pub quality: Option<String>,
    #[serde(flatten)]
    pub measurements: QualityMeasurementInput,
    /// Warehouse the approved lot is stored in, required when approving
    pub warehouse_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub location_detail: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Values written onto a delivery when it is approved.
///
/// Stored unrounded so that `total_payment` stays reproducible from the
/// stored price, net weight and measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoredEvaluation {
    humidity_percent: Decimal,
    impurities_percent: Decimal,
    damaged_grains_percent: Decimal,
    net_weight: Decimal,
    price_per_kg: Decimal,
    total_payment: Decimal,
}

impl StoredEvaluation {
    fn new(measurement: &QualityMeasurement, breakdown: &PaymentResult) -> Self {
        Self {
            humidity_percent: measurement.humidity_percent,
            impurities_percent: measurement.impurities_percent,
            damaged_grains_percent: measurement.damaged_grains_percent,
            net_weight: breakdown.net_weight,
            price_per_kg: breakdown.final_price_per_kg,
            total_payment: breakdown.total_payment,
        }
    }
}

/// Result of an evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationOutcome {
    pub delivery: DeliveryRecord,
    /// Itemized calculation, present for approved lots
    pub breakdown: Option<PaymentResult>,
    pub payment: Option<PaymentRecord>,
}

impl QualityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Calculate a payment breakdown without persisting anything
    pub async fn preview_payment(&self, input: CalculatePaymentInput) -> AppResult<PaymentResult> {
        input.validate()?;
        let measurement = QualityMeasurement::try_from(input.measurements)?;
        let lot = DeliveryLot::from_scale(input.product_state, input.gross_weight);

        let prices = PricingService::new(self.db.clone()).price_list().await?;
        let result = calculate_for_tier(&prices, &input.quality, lot.gross_weight, &measurement)?;

        Ok(result)
    }

    /// Record the inspector's decision on a delivery.
    ///
    /// Approval stores the calculated price and total on the delivery and
    /// creates or updates its pending payment in the same transaction.
    pub async fn evaluate_delivery(
        &self,
        owner_id: Uuid,
        delivery_id: Uuid,
        input: EvaluateDeliveryInput,
    ) -> AppResult<EvaluationOutcome> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        let delivery: DeliveryRecord = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {} FROM deliveries WHERE id = $1 AND owner_id = $2 FOR UPDATE",
            DELIVERY_COLUMNS
        ))
        .bind(delivery_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery".to_string()))?
        .try_into()?;

        ensure_can_evaluate(&delivery)?;

        let outcome = match input.decision {
            EvaluationDecision::Reject => {
                let row = sqlx::query_as::<_, DeliveryRow>(&format!(
                    r#"
                    UPDATE deliveries
                    SET status = $1, notes = COALESCE($2, notes), updated_at = NOW()
                    WHERE id = $3
                    RETURNING {}
                    "#,
                    DELIVERY_COLUMNS
                ))
                .bind(DeliveryStatus::Rejected.as_str())
                .bind(&input.notes)
                .bind(delivery.id)
                .fetch_one(&mut *tx)
                .await?;

                tracing::info!(delivery = %delivery.code, "Delivery rejected at quality control");

                EvaluationOutcome {
                    delivery: row.try_into()?,
                    breakdown: None,
                    payment: None,
                }
            }
            EvaluationDecision::Approve => {
                let quality = input.quality.as_deref().ok_or_else(|| AppError::Validation {
                    field: "quality".to_string(),
                    message: "Quality tier is required to approve a delivery".to_string(),
                    message_es: "Debe seleccionar una calidad para aprobar".to_string(),
                })?;
                let warehouse_id = input.warehouse_id.ok_or_else(|| AppError::Validation {
                    field: "warehouse_id".to_string(),
                    message: "Select the warehouse the approved lot is stored in".to_string(),
                    message_es: "Debe seleccionar el almacén de destino".to_string(),
                })?;
                let measurement = QualityMeasurement::try_from(input.measurements.clone())?;

                WarehouseService::find_owned(&mut tx, owner_id, warehouse_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?;
                let base_price = PricingService::base_price_for(&mut tx, quality).await?;

                let breakdown = calculate_quality_payment(delivery.weight, &measurement, base_price)?;
                ensure_priced(&breakdown)?;
                let stored = StoredEvaluation::new(&measurement, &breakdown);

                let row = sqlx::query_as::<_, DeliveryRow>(&format!(
                    r#"
                    UPDATE deliveries
                    SET quality = $1, humidity_percent = $2, impurities_percent = $3,
                        damaged_grains_percent = $4, net_weight = $5, price_per_kg = $6,
                        total_payment = $7, status = $8, warehouse_id = $9,
                        location_detail = $10, notes = COALESCE($11, notes),
                        updated_at = NOW()
                    WHERE id = $12
                    RETURNING {}
                    "#,
                    DELIVERY_COLUMNS
                ))
                .bind(quality.trim())
                .bind(stored.humidity_percent)
                .bind(stored.impurities_percent)
                .bind(stored.damaged_grains_percent)
                .bind(stored.net_weight)
                .bind(stored.price_per_kg)
                .bind(stored.total_payment)
                .bind(DeliveryStatus::Stored.as_str())
                .bind(warehouse_id)
                .bind(&input.location_detail)
                .bind(&input.notes)
                .bind(delivery.id)
                .fetch_one(&mut *tx)
                .await?;

                let payment = if breakdown.total_payment > Decimal::ZERO {
                    Some(
                        PaymentService::upsert_for_delivery(
                            &mut tx,
                            delivery.id,
                            &delivery.code,
                            breakdown.total_payment,
                        )
                        .await?,
                    )
                } else {
                    None
                };

                tracing::info!(
                    delivery = %delivery.code,
                    quality = %quality,
                    warehouse = %warehouse_id,
                    net_weight = %breakdown.net_weight,
                    price_per_kg = %breakdown.final_price_per_kg,
                    total = %breakdown.total_payment,
                    "Delivery approved at quality control"
                );

                EvaluationOutcome {
                    delivery: row.try_into()?,
                    breakdown: Some(breakdown),
                    payment,
                }
            }
        };

        tx.commit().await?;

        Ok(outcome)
    }
}

/// Only pending or in-review deliveries can be evaluated
fn ensure_can_evaluate(delivery: &DeliveryRecord) -> AppResult<()> {
    if !delivery.status.can_be_evaluated() {
        return Err(AppError::InvalidStateTransition(format!(
            "Delivery {} is '{}' and can no longer be evaluated",
            delivery.code, delivery.status
        )));
    }
    Ok(())
}

/// A lot whose damage penalty consumes the whole base price must be rejected
fn ensure_priced(breakdown: &PaymentResult) -> AppResult<()> {
    if breakdown.final_price_per_kg.is_zero() && !breakdown.base_price_per_kg.is_zero() {
        return Err(AppError::InvalidStateTransition(
            "Damage penalty reduces the price to zero; reject the delivery instead".to_string(),
        ));
    }
    Ok(())
}
