//! Route definitions for the Smart Irrigation System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/crops", get(handlers::list_crops_and_soils))
        .nest("/irrigation", irrigation_routes())
}

/// Irrigation decision and history routes
fn irrigation_routes() -> Router<AppState> {
    Router::new()
        .route("/decision", post(handlers::create_decision))
        .route("/history", get(handlers::get_history))
        .route("/export-csv", get(handlers::export_history_csv))
}
