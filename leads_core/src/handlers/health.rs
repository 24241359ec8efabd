//! Health check handlers

use crate::{models::request::ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /health");

    // Missing credentials degrade delivery but never take the service down.
    let status = if state.delivery_configured { "healthy" } else { "degraded" };

    Json(ApiResponse::success(serde_json::json!({
        "status": status,
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "active_sessions": state.sessions.len(),
        "delivery_configured": state.delivery_configured,
    })))
}
