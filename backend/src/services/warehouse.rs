//! Warehouse service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

const WAREHOUSE_COLUMNS: &str =
    "id, owner_id, name, warehouse_type, capacity, location, status, created_at, updated_at";

#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

/// Warehouse where approved lots are stored
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WarehouseRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub name: String,
    pub warehouse_type: Option<String>,
    /// Capacity in kg
    pub capacity: Option<Decimal>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a warehouse
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 100))]
    pub warehouse_type: Option<String>,
    pub capacity: Option<Decimal>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

impl WarehouseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_warehouse(
        &self,
        owner_id: Uuid,
        input: CreateWarehouseInput,
    ) -> AppResult<WarehouseRecord> {
        input.validate()?;
        if input.capacity.is_some_and(|capacity| capacity <= Decimal::ZERO) {
            return Err(AppError::Validation {
                field: "capacity".to_string(),
                message: "Capacity must be positive".to_string(),
                message_es: "La capacidad debe ser mayor que cero".to_string(),
            });
        }

        let row = sqlx::query_as::<_, WarehouseRecord>(&format!(
            r#"
            INSERT INTO warehouses (owner_id, name, warehouse_type, capacity, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            WAREHOUSE_COLUMNS
        ))
        .bind(owner_id)
        .bind(input.name.trim())
        .bind(&input.warehouse_type)
        .bind(input.capacity)
        .bind(&input.location)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(warehouse = %row.id, name = %row.name, "Warehouse registered");

        Ok(row)
    }

    pub async fn get_warehouse(
        &self,
        owner_id: Uuid,
        warehouse_id: Uuid,
    ) -> AppResult<WarehouseRecord> {
        let mut conn = self.db.acquire().await?;
        Self::find_owned(&mut conn, owner_id, warehouse_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))
    }

    pub async fn list_warehouses(&self, owner_id: Uuid) -> AppResult<Vec<WarehouseRecord>> {
        let rows = sqlx::query_as::<_, WarehouseRecord>(&format!(
            "SELECT {} FROM warehouses WHERE owner_id = $1 ORDER BY name",
            WAREHOUSE_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Look up a warehouse only if it belongs to the owner
    pub async fn find_owned(
        conn: &mut PgConnection,
        owner_id: Uuid,
        warehouse_id: Uuid,
    ) -> AppResult<Option<WarehouseRecord>> {
        let row = sqlx::query_as::<_, WarehouseRecord>(&format!(
            "SELECT {} FROM warehouses WHERE id = $1 AND owner_id = $2",
            WAREHOUSE_COLUMNS
        ))
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }
}
