//! HTTP handlers for warehouses

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::warehouse::{CreateWarehouseInput, WarehouseRecord, WarehouseService};
use crate::AppState;

/// Register a warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<(StatusCode, Json<WarehouseRecord>)> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.create_warehouse(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

/// Get warehouse by ID
pub async fn get_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<WarehouseRecord>> {
    let service = WarehouseService::new(state.db);
    let warehouse = service
        .get_warehouse(current_user.0.user_id, warehouse_id)
        .await?;
    Ok(Json(warehouse))
}

/// List warehouses for the current user
pub async fn list_warehouses(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<WarehouseRecord>>> {
    let service = WarehouseService::new(state.db);
    let warehouses = service.list_warehouses(current_user.0.user_id).await?;
    Ok(Json(warehouses))
}
