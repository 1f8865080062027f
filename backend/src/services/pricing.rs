//! Quality tier price list service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{validate_base_price, CalculationError, PriceList, QualityTier};

/// Service for reading and maintaining the price list
#[derive(Clone)]
pub struct PricingService {
    db: PgPool,
}

/// Stored quality tier
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QualityTierRecord {
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QualityTierRecord> for QualityTier {
    fn from(record: QualityTierRecord) -> Self {
        QualityTier::new(record.name, record.base_price)
    }
}

/// Input for changing a tier's base price
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePriceInput {
    #[validate(length(min = 1, max = 100))]
    pub quality: String,
    pub price: Decimal,
}

impl PricingService {
    /// Create a new PricingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all quality tiers, most expensive first
    pub async fn list_tiers(&self) -> AppResult<Vec<QualityTierRecord>> {
        let rows = sqlx::query_as::<_, QualityTierRecord>(
            r#"
            SELECT id, name, base_price, created_at, updated_at
            FROM quality_tiers
            ORDER BY base_price DESC, name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Load the full price list for calculator lookups
    pub async fn price_list(&self) -> AppResult<PriceList> {
        let tiers = self.list_tiers().await?;
        Ok(PriceList::new(tiers.into_iter().map(Into::into).collect()))
    }

    /// Update the base price of an existing tier
    pub async fn update_price(&self, input: UpdatePriceInput) -> AppResult<QualityTierRecord> {
        input.validate()?;
        validate_base_price(input.price).map_err(|reason| AppError::Validation {
            field: "price".to_string(),
            message: reason.to_string(),
            message_es: "El precio no puede ser negativo".to_string(),
        })?;

        let name = input.quality.trim();
        let row = sqlx::query_as::<_, QualityTierRecord>(
            r#"
            UPDATE quality_tiers
            SET base_price = $1, updated_at = NOW()
            WHERE name = $2
            RETURNING id, name, base_price, created_at, updated_at
            "#,
        )
        .bind(input.price)
        .bind(name)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| CalculationError::UnknownQualityTier(name.to_string()))?;

        tracing::info!(tier = %row.name, price = %row.base_price, "Quality tier price updated");

        Ok(row)
    }

    /// Resolve a tier's base price inside an open transaction
    pub async fn base_price_for(conn: &mut PgConnection, name: &str) -> AppResult<Decimal> {
        let name = name.trim();
        let price = sqlx::query_scalar::<_, Decimal>(
            "SELECT base_price FROM quality_tiers WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| CalculationError::UnknownQualityTier(name.to_string()))?;

        Ok(price)
    }
}
