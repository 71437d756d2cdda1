//! HTTP handlers for irrigation decisions and history

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::IrrigationLog;
use crate::services::irrigation::{DecisionRequest, DecisionResponse};
use crate::AppState;

/// Request an irrigation decision
pub async fn create_decision(
    State(state): State<AppState>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<(StatusCode, Json<DecisionResponse>)> {
    let response = state.irrigation.make_decision(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Query parameters for decision history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub crop_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<IrrigationLog>,
}

/// Get recent decisions, newest first
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let history = state
        .irrigation
        .history(query.limit, query.crop_type.as_deref());
    Json(HistoryResponse { history })
}

/// Export the full decision history as CSV
pub async fn export_history_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = state.irrigation.export_history_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"irrigation_history.csv\"",
            ),
        ],
        csv,
    ))
}
