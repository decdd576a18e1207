pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::history::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/v1/analyze", post(handle_analyze))
        // History
        .route("/api/v1/history", get(handlers::handle_list_history))
        .route(
            "/api/v1/history/:id",
            get(handlers::handle_get_analysis).delete(handlers::handle_delete_analysis),
        )
        .route("/api/v1/dashboard", get(handlers::handle_dashboard))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
