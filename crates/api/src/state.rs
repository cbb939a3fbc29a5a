use std::sync::Arc;

use modbridge_core::alert::AlertSink;
use modbridge_core::claim::ClaimStore;
use modbridge_core::teleport::TeleportQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where validated alerts are posted (the Discord alert channel in production).
    pub alert_sink: Arc<dyn AlertSink>,
    /// Pending teleport requests awaiting the game server's poll.
    pub teleport_queue: Arc<TeleportQueue>,
    /// Claimed alerts, shared with the Discord handler.
    pub claims: Arc<dyn ClaimStore>,
}
