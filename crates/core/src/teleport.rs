//! Teleport requests and the polling queue.
//!
//! Requests are appended by the relay and drained wholesale by the game
//! server's poller. Delivery is best-effort: the queue lives in memory, is
//! lost on restart, and a batch is gone once drained even if the poller
//! fails to act on it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::CoreError;

const MISSING_NAMES: &str = "Missing modUsername or targetUsername";
const MISSING_NAMES_OR_JOB: &str = "Missing modUsername, targetUsername or jobId";

/// Raw request body for `POST /request-teleport`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeleportPayload {
    pub mod_username: Option<String>,
    pub target_username: Option<String>,
    pub job_id: Option<String>,
}

/// A validated request to move a moderator to a target player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeleportRequest {
    pub mod_username: String,
    pub target_username: String,
    /// Server instance the target is in, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

impl TeleportRequest {
    pub fn new(mod_username: impl Into<String>, target_username: impl Into<String>) -> Self {
        Self {
            mod_username: mod_username.into(),
            target_username: target_username.into(),
            job_id: None,
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which fields a queued request must carry.
///
/// Deployments whose game servers route by job id run with
/// `require_job_id`; the others accept requests without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueuePolicy {
    pub require_job_id: bool,
}

impl QueuePolicy {
    pub fn validate(&self, payload: TeleportPayload) -> Result<TeleportRequest, CoreError> {
        let missing_message = if self.require_job_id {
            MISSING_NAMES_OR_JOB
        } else {
            MISSING_NAMES
        };

        let mod_username = non_empty(payload.mod_username);
        let target_username = non_empty(payload.target_username);
        let job_id = non_empty(payload.job_id);

        let (Some(mod_username), Some(target_username)) = (mod_username, target_username) else {
            return Err(CoreError::Validation(missing_message.into()));
        };
        if self.require_job_id && job_id.is_none() {
            return Err(CoreError::Validation(missing_message.into()));
        }

        Ok(TeleportRequest {
            mod_username,
            target_username,
            job_id,
        })
    }

    /// Validate an already-built request (e.g. one issued from Discord).
    pub fn check(&self, request: TeleportRequest) -> Result<TeleportRequest, CoreError> {
        self.validate(TeleportPayload {
            mod_username: Some(request.mod_username),
            target_username: Some(request.target_username),
            job_id: request.job_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Storage for pending teleport requests.
#[async_trait]
pub trait TeleportStore: Send + Sync {
    async fn enqueue(&self, request: TeleportRequest);

    /// Take every pending request in insertion order, leaving the store empty.
    async fn drain(&self) -> Vec<TeleportRequest>;

    async fn pending(&self) -> usize;
}

/// Unbounded in-memory FIFO.
#[derive(Debug, Default)]
pub struct MemoryTeleportStore {
    pending: Mutex<Vec<TeleportRequest>>,
}

impl MemoryTeleportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeleportStore for MemoryTeleportStore {
    async fn enqueue(&self, request: TeleportRequest) {
        self.pending.lock().await.push(request);
    }

    async fn drain(&self) -> Vec<TeleportRequest> {
        std::mem::take(&mut *self.pending.lock().await)
    }

    async fn pending(&self) -> usize {
        self.pending.lock().await.len()
    }
}

// ---------------------------------------------------------------------------
// Queue service
// ---------------------------------------------------------------------------

/// Validating front for a [`TeleportStore`].
pub struct TeleportQueue {
    store: Box<dyn TeleportStore>,
    policy: QueuePolicy,
}

impl TeleportQueue {
    pub fn new(store: impl TeleportStore + 'static, policy: QueuePolicy) -> Self {
        Self {
            store: Box::new(store),
            policy,
        }
    }

    /// In-memory queue with the given policy.
    pub fn in_memory(policy: QueuePolicy) -> Self {
        Self::new(MemoryTeleportStore::new(), policy)
    }

    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Validate and enqueue a request from the HTTP surface.
    pub async fn submit(&self, payload: TeleportPayload) -> Result<TeleportRequest, CoreError> {
        let request = self.policy.validate(payload)?;
        self.push(request.clone()).await;
        Ok(request)
    }

    /// Validate and enqueue an already-built request.
    pub async fn submit_request(
        &self,
        request: TeleportRequest,
    ) -> Result<TeleportRequest, CoreError> {
        let request = self.policy.check(request)?;
        self.push(request.clone()).await;
        Ok(request)
    }

    pub async fn drain(&self) -> Vec<TeleportRequest> {
        let drained = self.store.drain().await;
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "Teleport queue drained");
        }
        drained
    }

    pub async fn pending(&self) -> usize {
        self.store.pending().await
    }

    async fn push(&self, request: TeleportRequest) {
        tracing::info!(
            moderator = %request.mod_username,
            target_player = %request.target_username,
            job_id = request.job_id.as_deref().unwrap_or("-"),
            "Teleport queued"
        );
        self.store.enqueue(request).await;
    }
}
