//! Submission metrics handler

use crate::{models::request::ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

pub async fn handle_metrics(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /api/metrics");

    let mut snapshot = serde_json::to_value(state.metrics.get_snapshot()).unwrap_or_default();
    snapshot["active_sessions"] = serde_json::Value::from(state.sessions.len());

    Json(ApiResponse::success(snapshot))
}
