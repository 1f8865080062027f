//! Route definitions for the AgroSync API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - price list
        .nest("/prices", price_routes(state.clone()))
        // Protected routes - quality control
        .nest("/quality", quality_routes(state.clone()))
        // Protected routes - farmers
        .nest("/farmers", farmer_routes(state.clone()))
        // Protected routes - warehouses
        .nest("/warehouses", warehouse_routes(state.clone()))
        // Protected routes - deliveries
        .nest("/deliveries", delivery_routes(state.clone()))
        // Protected routes - payments
        .nest("/payments", payment_routes(state))
}

/// Price list routes (protected)
fn price_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_prices).put(handlers::update_price))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Quality control routes (protected)
fn quality_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/calculate", post(handlers::calculate_payment))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Farmer registry routes (protected)
fn farmer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farmers).post(handlers::create_farmer))
        .route("/:farmer_id", get(handlers::get_farmer))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Warehouse routes (protected)
fn warehouse_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_warehouses).post(handlers::create_warehouse))
        .route("/:warehouse_id", get(handlers::get_warehouse))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Delivery routes (protected)
fn delivery_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_deliveries).post(handlers::create_delivery))
        .route("/:delivery_id", get(handlers::get_delivery))
        .route("/:delivery_id/evaluation", post(handlers::evaluate_delivery))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Payment routes (protected)
fn payment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_payments))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
