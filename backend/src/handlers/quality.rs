//! HTTP handlers for quality control

use axum::{
    extract::{Path, State},
    Json,
};
use shared::PaymentResult;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::quality::{
    CalculatePaymentInput, EvaluateDeliveryInput, EvaluationOutcome, QualityService,
};
use crate::AppState;

/// Preview the payment for a set of measurements
pub async fn calculate_payment(
    State(state): State<AppState>,
    Json(input): Json<CalculatePaymentInput>,
) -> AppResult<Json<PaymentResult>> {
    let service = QualityService::new(state.db);
    let result = service.preview_payment(input).await?;
    Ok(Json(result))
}

/// Approve or reject a delivery at quality control
pub async fn evaluate_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(delivery_id): Path<Uuid>,
    Json(input): Json<EvaluateDeliveryInput>,
) -> AppResult<Json<EvaluationOutcome>> {
    let service = QualityService::new(state.db);
    let outcome = service
        .evaluate_delivery(current_user.0.user_id, delivery_id, input)
        .await?;
    Ok(Json(outcome))
}
