//! Route definitions for the game server integration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{alert, teleport};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /alert             -> post_alert
/// POST /request-teleport  -> request_teleport
/// GET  /poll-teleport     -> poll_teleport
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/alert", post(alert::post_alert))
        .route("/request-teleport", post(teleport::request_teleport))
        .route("/poll-teleport", get(teleport::poll_teleport))
}
