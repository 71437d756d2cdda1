//! HTTP handlers for crop and soil reference data

use axum::{extract::State, Json};

use crate::services::irrigation::CatalogResponse;
use crate::AppState;

/// List available crops and soils
pub async fn list_crops_and_soils(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(state.irrigation.catalog())
}
