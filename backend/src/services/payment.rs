//! Farmer payment service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use shared::{auto_payment_reference, PaymentMethod, PaymentStatus};

#[derive(Clone)]
pub struct PaymentService {
    db: PgPool,
}

/// Payment joined with the delivery it settles
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub delivery_id: Uuid,
    pub delivery_code: String,
    pub farmer_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub reference: Option<String>,
    pub status: String,
    pub paid_at: DateTime<Utc>,
}

impl PaymentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List payments for deliveries owned by the user, newest first
    pub async fn list_payments(&self, owner_id: Uuid) -> AppResult<Vec<PaymentRecord>> {
        let rows = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT p.id, p.delivery_id, d.code AS delivery_code, d.farmer_id,
                   p.amount, p.method, p.reference, p.status, p.paid_at
            FROM payments p
            JOIN deliveries d ON d.id = p.delivery_id
            WHERE d.owner_id = $1
            ORDER BY p.paid_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Create the pending transfer for an approved delivery, or bring an
    /// existing payment's amount in line with the new total
    pub async fn upsert_for_delivery(
        conn: &mut PgConnection,
        delivery_id: Uuid,
        delivery_code: &str,
        amount: Decimal,
    ) -> AppResult<PaymentRecord> {
        let row = sqlx::query_as::<_, PaymentRecord>(
            r#"
            WITH upserted AS (
                INSERT INTO payments (delivery_id, amount, method, reference, status)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (delivery_id) DO UPDATE SET amount = EXCLUDED.amount
                RETURNING id, delivery_id, amount, method, reference, status, paid_at
            )
            SELECT u.id, u.delivery_id, d.code AS delivery_code, d.farmer_id,
                   u.amount, u.method, u.reference, u.status, u.paid_at
            FROM upserted u
            JOIN deliveries d ON d.id = u.delivery_id
            "#,
        )
        .bind(delivery_id)
        .bind(amount)
        .bind(PaymentMethod::Transfer.as_str())
        .bind(auto_payment_reference(delivery_code))
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(conn)
        .await?;

        tracing::info!(
            delivery = %delivery_code,
            amount = %row.amount,
            "Payment recorded for delivery"
        );

        Ok(row)
    }
}
