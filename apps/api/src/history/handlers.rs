//! Axum route handlers for the History API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::history::{DashboardStats, HistoryEntry};
use crate::state::AppState;

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    Ok(Json(state.history.list_history().await?))
}

/// GET /api/v1/history/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnalysisReport>, AppError> {
    state
        .history
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Analysis not found.".to_string()))
}

/// DELETE /api/v1/history/:id
///
/// Always 204; deleting an unknown id is not an error.
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.history.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.history.dashboard_stats().await?))
}
