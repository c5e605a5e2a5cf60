//! Health check handler

use axum::{extract::State, Json};
use member_service::dto::HealthResponse;

use crate::state::AppState;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "membership-api";

/// Liveness probe; no authentication and no dependency checks
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        SERVICE_NAME,
        state.config().app.deployment.as_str(),
    ))
}
