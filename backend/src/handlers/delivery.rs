//! HTTP handlers for delivery endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::delivery::{CreateDeliveryInput, DeliveryRecord, DeliveryService};
use crate::AppState;

/// Register a new delivery
pub async fn create_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateDeliveryInput>,
) -> AppResult<(StatusCode, Json<DeliveryRecord>)> {
    let service = DeliveryService::new(state.db);
    let delivery = service.create_delivery(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}

/// Get delivery by ID
pub async fn get_delivery(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(delivery_id): Path<Uuid>,
) -> AppResult<Json<DeliveryRecord>> {
    let service = DeliveryService::new(state.db);
    let delivery = service
        .get_delivery(current_user.0.user_id, delivery_id)
        .await?;
    Ok(Json(delivery))
}

/// List deliveries for the current user
pub async fn list_deliveries(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<DeliveryRecord>>> {
    let service = DeliveryService::new(state.db);
    let deliveries = service.list_deliveries(current_user.0.user_id).await?;
    Ok(Json(deliveries))
}
