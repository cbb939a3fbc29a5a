//! Forwarding moderator teleport commands to the game.
//!
//! A [`TeleportRelay`] is picked once at startup. [`QueueRelay`] parks
//! requests for the game server's poller; the direct Open Cloud backend
//! lives in the cloud crate.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::roles::authorize;
use crate::teleport::{TeleportQueue, TeleportRequest};

pub const QUEUED_MESSAGE: &str = "Teleport request queued.";

/// Backend acknowledgement of a relayed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayAck {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Backend-provided text shown to the moderator.
    pub message: String,
}

impl RelayAck {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request was refused before reaching the game (bad input).
    #[error("{0}")]
    Rejected(String),

    /// The remote API answered with an error.
    #[error("{0}")]
    Remote(String),

    /// The remote API could not be reached.
    #[error("{0}")]
    Transport(String),
}

impl From<CoreError> for RelayError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => RelayError::Rejected(msg),
            other => RelayError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
pub trait TeleportRelay: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    async fn relay(&self, request: TeleportRequest) -> Result<RelayAck, RelayError>;
}

/// Relay that appends to the in-process polling queue.
pub struct QueueRelay {
    queue: Arc<TeleportQueue>,
}

impl QueueRelay {
    pub fn new(queue: Arc<TeleportQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl TeleportRelay for QueueRelay {
    fn backend(&self) -> &'static str {
        "queue"
    }

    async fn relay(&self, request: TeleportRequest) -> Result<RelayAck, RelayError> {
        self.queue.submit_request(request).await?;
        Ok(RelayAck::accepted(QUEUED_MESSAGE))
    }
}

/// Relay `request` only if the moderator holds `required`.
///
/// `announce` runs after authorization and before the relay is called, so a
/// moderator without the role never reaches the backend. Returns
/// [`CoreError::Forbidden`] on denial, otherwise the relay's answer.
pub async fn relay_if_authorized<S, F, Fut>(
    role_names: &[S],
    required: &str,
    relay: &dyn TeleportRelay,
    request: TeleportRequest,
    announce: F,
) -> Result<Result<RelayAck, RelayError>, CoreError>
where
    S: AsRef<str>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    authorize(role_names, required)?;
    announce().await;
    Ok(relay.relay(request).await)
}

// ---------------------------------------------------------------------------
// Moderator-facing text
// ---------------------------------------------------------------------------

/// Public reply posted as soon as an authorized `/teleport` is received.
pub fn sending_message(target: &str) -> String {
    format!("🚀 Sending teleport request to **{target}**...")
}

/// Private follow-up describing how the relay went.
pub fn followup_message(result: &Result<RelayAck, RelayError>) -> String {
    match result {
        Ok(ack) if ack.success => format!("✅ {}", ack.message),
        Ok(ack) => format!("⚠️ {}", ack.message),
        Err(err) => format!("❌ Failed to send teleport request: {err}"),
    }
}
