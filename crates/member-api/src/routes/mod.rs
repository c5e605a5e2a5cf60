//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{health, members};
use crate::state::AppState;

/// Create the API router (health is kept separate for its own middleware)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(member_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/:id", get(members::get_member))
}
