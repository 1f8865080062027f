//! HTTP handlers for the quality tier price list

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::pricing::{PricingService, QualityTierRecord, UpdatePriceInput};
use crate::AppState;

/// List all quality tiers
pub async fn list_prices(State(state): State<AppState>) -> AppResult<Json<Vec<QualityTierRecord>>> {
    let service = PricingService::new(state.db);
    let tiers = service.list_tiers().await?;
    Ok(Json(tiers))
}

/// Update a tier's base price by name
pub async fn update_price(
    State(state): State<AppState>,
    Json(input): Json<UpdatePriceInput>,
) -> AppResult<Json<QualityTierRecord>> {
    let service = PricingService::new(state.db);
    let tier = service.update_price(input).await?;
    Ok(Json(tier))
}
