//! Handlers for the teleport polling queue.
//!
//! `POST /request-teleport` enqueues, `GET /poll-teleport` drains. Both
//! answer in the shapes the game-side polling script expects rather than
//! the `{ data }` envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use modbridge_core::error::CoreError;
use modbridge_core::relay::QUEUED_MESSAGE;
use modbridge_core::teleport::{TeleportPayload, TeleportRequest};
use serde::Serialize;

use crate::state::AppState;

/// Response for POST /request-teleport.
#[derive(Debug, Serialize)]
pub struct TeleportAck {
    pub success: bool,
    pub message: String,
}

/// Response for GET /poll-teleport.
#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub requests: Vec<TeleportRequest>,
}

/// POST /request-teleport
///
/// An unparseable body is treated like an empty one, so the caller gets the
/// usual missing-fields answer.
pub async fn request_teleport(
    State(state): State<AppState>,
    payload: Result<Json<TeleportPayload>, JsonRejection>,
) -> (StatusCode, Json<TeleportAck>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable teleport request body");
            TeleportPayload::default()
        }
    };

    match state.teleport_queue.submit(payload).await {
        Ok(_) => (
            StatusCode::OK,
            Json(TeleportAck {
                success: true,
                message: QUEUED_MESSAGE.to_string(),
            }),
        ),
        Err(err) => {
            let message = match err {
                CoreError::Validation(msg) => msg,
                other => other.to_string(),
            };
            tracing::debug!(reason = %message, "Teleport request rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(TeleportAck {
                    success: false,
                    message,
                }),
            )
        }
    }
}

/// GET /poll-teleport
///
/// Returns every pending request and empties the queue.
pub async fn poll_teleport(State(state): State<AppState>) -> Json<PollResponse> {
    Json(PollResponse {
        requests: state.teleport_queue.drain().await,
    })
}
