use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Teleport requests waiting for the next poll.
    pub pending_teleports: usize,
    /// Alerts claimed since startup.
    pub claimed_alerts: usize,
}

/// GET / -- plain-text liveness probe.
async fn liveness() -> &'static str {
    "Bot is running!"
}

/// GET /health -- returns service status and in-memory queue sizes.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pending_teleports: state.teleport_queue.pending().await,
        claimed_alerts: state.claims.claimed_count().await,
    })
}

/// Mount liveness and health routes at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
}
