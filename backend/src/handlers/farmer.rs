//! HTTP handlers for the farmer registry

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::farmer::{CreateFarmerInput, FarmerRecord, FarmerService};
use crate::AppState;

/// Register a farmer for the current collection point
pub async fn create_farmer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateFarmerInput>,
) -> AppResult<(StatusCode, Json<FarmerRecord>)> {
    let service = FarmerService::new(state.db);
    let farmer = service.create_farmer(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(farmer)))
}

pub async fn get_farmer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<Json<FarmerRecord>> {
    let service = FarmerService::new(state.db);
    let farmer = service.get_farmer(current_user.0.user_id, farmer_id).await?;
    Ok(Json(farmer))
}

pub async fn list_farmers(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<FarmerRecord>>> {
    let service = FarmerService::new(state.db);
    let farmers = service.list_farmers(current_user.0.user_id).await?;
    Ok(Json(farmers))
}
