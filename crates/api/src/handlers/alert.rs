//! Handler for alerts reported by the game server.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use modbridge_core::alert::AlertPayload;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for a delivered alert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDelivered {
    /// Id of the posted Discord message. A string because snowflakes
    /// overflow JavaScript and Luau numbers.
    pub message_id: String,
    pub status: &'static str,
}

/// POST /alert
///
/// Validates the payload, renders the notice and posts it once. Missing
/// `player`, `flagType` or `joinUrl` is a 400; a failed post is a 500.
pub async fn post_alert(
    State(state): State<AppState>,
    payload: Result<Json<AlertPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let alert = payload.validate_alert()?;
    let delivered = state.alert_sink.deliver(&alert.notice()).await?;

    tracing::info!(
        player = %alert.player,
        flag_type = %alert.flag_type,
        alert_id = delivered.alert_id,
        "Alert relayed"
    );

    Ok(Json(DataResponse {
        data: AlertDelivered {
            message_id: delivered.alert_id.to_string(),
            status: "Alert sent to Discord",
        },
    }))
}
