//! Farmer registry service
//!
//! Farmers belong to the collection point that registered them; every query
//! is scoped to the owner taken from the caller's token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

const FARMER_COLUMNS: &str =
    "id, owner_id, name, document, phone, zone, status, created_at, updated_at";

#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Registered farmer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FarmerRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub name: String,
    /// National identity or tax document number
    pub document: String,
    pub phone: Option<String>,
    pub zone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFarmerInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub document: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub zone: Option<String>,
}

impl FarmerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_farmer(
        &self,
        owner_id: Uuid,
        input: CreateFarmerInput,
    ) -> AppResult<FarmerRecord> {
        input.validate()?;

        let row = sqlx::query_as::<_, FarmerRecord>(&format!(
            r#"
            INSERT INTO farmers (owner_id, name, document, phone, zone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner_id, document) DO NOTHING
            RETURNING {}
            "#,
            FARMER_COLUMNS
        ))
        .bind(owner_id)
        .bind(input.name.trim())
        .bind(input.document.trim())
        .bind(&input.phone)
        .bind(&input.zone)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "document".to_string(),
            message: "A farmer with this document is already registered".to_string(),
            message_es: "Ya existe un agricultor con este documento".to_string(),
        })?;

        tracing::info!(farmer = %row.id, "Farmer registered");

        Ok(row)
    }

    pub async fn get_farmer(&self, owner_id: Uuid, farmer_id: Uuid) -> AppResult<FarmerRecord> {
        let mut conn = self.db.acquire().await?;
        Self::find_owned(&mut conn, owner_id, farmer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Farmer".to_string()))
    }

    /// List the owner's farmers alphabetically
    pub async fn list_farmers(&self, owner_id: Uuid) -> AppResult<Vec<FarmerRecord>> {
        let rows = sqlx::query_as::<_, FarmerRecord>(&format!(
            "SELECT {} FROM farmers WHERE owner_id = $1 ORDER BY name",
            FARMER_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Look up a farmer only if it belongs to the owner
    pub async fn find_owned(
        conn: &mut PgConnection,
        owner_id: Uuid,
        farmer_id: Uuid,
    ) -> AppResult<Option<FarmerRecord>> {
        let row = sqlx::query_as::<_, FarmerRecord>(&format!(
            "SELECT {} FROM farmers WHERE id = $1 AND owner_id = $2",
            FARMER_COLUMNS
        ))
        .bind(farmer_id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farmer_input_requires_document() {
        let input = CreateFarmerInput {
            name: "Rosa Huamán".to_string(),
            document: String::new(),
            phone: None,
            zone: Some("Alto Huallaga".to_string()),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("document"));
    }
}
