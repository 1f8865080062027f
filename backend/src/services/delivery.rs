//! Delivery registration service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::farmer::FarmerService;
use shared::{validate_gross_weight, DeliveryLot, DeliveryStatus, ProductState, FRESH_TO_DRY_FACTOR};

/// Columns selected for every delivery query
pub(crate) const DELIVERY_COLUMNS: &str = r#"
    id, code, owner_id, farmer_id, product, product_state, weight_fresh, weight,
    conversion_factor, quality, humidity_percent, impurities_percent,
    damaged_grains_percent, net_weight, price_per_kg, total_payment, status,
    warehouse_id, location_detail, delivery_date, notes, created_at, updated_at
"#;

#[derive(Clone)]
pub struct DeliveryService {
    db: PgPool,
}

/// Database row for a delivery
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DeliveryRow {
    id: Uuid,
    code: String,
    owner_id: Uuid,
    farmer_id: Uuid,
    product: String,
    product_state: String,
    weight_fresh: Option<Decimal>,
    weight: Decimal,
    conversion_factor: Decimal,
    quality: Option<String>,
    humidity_percent: Option<Decimal>,
    impurities_percent: Option<Decimal>,
    damaged_grains_percent: Option<Decimal>,
    net_weight: Option<Decimal>,
    price_per_kg: Option<Decimal>,
    total_payment: Option<Decimal>,
    status: String,
    warehouse_id: Option<Uuid>,
    location_detail: Option<String>,
    delivery_date: DateTime<Utc>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryRow> for DeliveryRecord {
    type Error = AppError;

    fn try_from(row: DeliveryRow) -> Result<Self, Self::Error> {
        let status = DeliveryStatus::from_db(&row.status).ok_or_else(|| {
            AppError::Internal(format!(
                "Delivery {} has unknown status '{}'",
                row.code, row.status
            ))
        })?;

        Ok(DeliveryRecord {
            id: row.id,
            code: row.code,
            owner_id: row.owner_id,
            farmer_id: row.farmer_id,
            product: row.product,
            product_state: ProductState::from_db(&row.product_state),
            weight_fresh: row.weight_fresh,
            weight: row.weight,
            conversion_factor: row.conversion_factor,
            quality: row.quality,
            humidity_percent: row.humidity_percent,
            impurities_percent: row.impurities_percent,
            damaged_grains_percent: row.damaged_grains_percent,
            net_weight: row.net_weight,
            price_per_kg: row.price_per_kg,
            total_payment: row.total_payment,
            status,
            warehouse_id: row.warehouse_id,
            location_detail: row.location_detail,
            delivery_date: row.delivery_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Delivery record
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRecord {
    pub id: Uuid,
    /// Human-facing code, e.g. "DEL-4F2A91C0"
    pub code: String,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub farmer_id: Uuid,
    pub product: String,
    pub product_state: ProductState,
    pub weight_fresh: Option<Decimal>,
    /// Dry-weight equivalent used as gross weight for quality payment
    pub weight: Decimal,
    pub conversion_factor: Decimal,
    pub quality: Option<String>,
    pub humidity_percent: Option<Decimal>,
    pub impurities_percent: Option<Decimal>,
    pub damaged_grains_percent: Option<Decimal>,
    pub net_weight: Option<Decimal>,
    pub price_per_kg: Option<Decimal>,
    pub total_payment: Option<Decimal>,
    pub status: DeliveryStatus,
    /// Where the lot was stored once approved
    pub warehouse_id: Option<Uuid>,
    /// Shelf, bay or stack inside the warehouse
    pub location_detail: Option<String>,
    pub delivery_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a delivery
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeliveryInput {
    pub farmer_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub product: String,
    #[serde(default)]
    pub product_state: ProductState,
    /// Scale reading; fresh weight for "baba", dry weight for "seco"
    pub weight: Decimal,
    pub delivery_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl DeliveryService {
    /// Create a new DeliveryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a delivery; fresh lots are stored at dry-weight equivalent
    pub async fn create_delivery(
        &self,
        owner_id: Uuid,
        input: CreateDeliveryInput,
    ) -> AppResult<DeliveryRecord> {
        input.validate()?;
        validate_gross_weight(input.weight).map_err(|reason| AppError::Validation {
            field: "weight".to_string(),
            message: reason.to_string(),
            message_es: "El peso debe ser mayor que cero".to_string(),
        })?;

        let mut conn = self.db.acquire().await?;
        if FarmerService::find_owned(&mut conn, owner_id, input.farmer_id)
            .await?
            .is_none()
        {
            return Err(unknown_farmer());
        }

        let lot = DeliveryLot::from_scale(input.product_state, input.weight);
        let code = generate_delivery_code();

        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            r#"
            INSERT INTO deliveries (
                code, owner_id, farmer_id, product, product_state, weight_fresh,
                weight, conversion_factor, status, delivery_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            DELIVERY_COLUMNS
        ))
        .bind(&code)
        .bind(owner_id)
        .bind(input.farmer_id)
        .bind(input.product.trim())
        .bind(lot.product_state.as_str())
        .bind(lot.weight_fresh)
        .bind(lot.gross_weight)
        .bind(FRESH_TO_DRY_FACTOR)
        .bind(DeliveryStatus::Pending.as_str())
        .bind(input.delivery_date.unwrap_or_else(Utc::now))
        .bind(&input.notes)
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(
            delivery = %code,
            farmer = %input.farmer_id,
            state = lot.product_state.as_str(),
            weight = %lot.gross_weight,
            "Delivery registered"
        );

        row.try_into()
    }

    /// Get a delivery owned by the user
    pub async fn get_delivery(&self, owner_id: Uuid, delivery_id: Uuid) -> AppResult<DeliveryRecord> {
        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {} FROM deliveries WHERE id = $1 AND owner_id = $2",
            DELIVERY_COLUMNS
        ))
        .bind(delivery_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery".to_string()))?;

        row.try_into()
    }

    /// List deliveries owned by the user, newest first
    pub async fn list_deliveries(&self, owner_id: Uuid) -> AppResult<Vec<DeliveryRecord>> {
        let rows = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {} FROM deliveries WHERE owner_id = $1 ORDER BY delivery_date DESC",
            DELIVERY_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(DeliveryRecord::try_from).collect()
    }
}

fn unknown_farmer() -> AppError {
    AppError::Validation {
        field: "farmer_id".to_string(),
        message: "Farmer is not registered at this collection point".to_string(),
        message_es: "El agricultor no está registrado en este centro de acopio".to_string(),
    }
}

/// Generate a delivery code such as "DEL-4F2A91C0"
fn generate_delivery_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("DEL-{}", id[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_code_format() {
        let code = generate_delivery_code();
        assert!(code.starts_with("DEL-"));
        assert_eq!(code.len(), 12);
        assert!(!code.contains('#'));
    }

    #[test]
    fn test_unknown_farmer_points_at_farmer_field() {
        match unknown_farmer() {
            AppError::Validation { field, .. } => assert_eq!(field, "farmer_id"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
