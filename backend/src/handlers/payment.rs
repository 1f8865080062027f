//! HTTP handlers for payments

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::payment::{PaymentRecord, PaymentService};
use crate::AppState;

/// List payments for the current user's deliveries
pub async fn list_payments(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PaymentRecord>>> {
    let service = PaymentService::new(state.db);
    let payments = service.list_payments(current_user.0.user_id).await?;
    Ok(Json(payments))
}
