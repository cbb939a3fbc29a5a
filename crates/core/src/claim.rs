//! First-caller-wins claiming of posted alerts.
//!
//! Claims are recorded by alert id only and live for the lifetime of the
//! process. [`ClaimStore::try_claim`] is a single insert-if-absent so two
//! concurrent clicks on the same alert can never both win.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::types::{AlertId, DiscordUserId};

/// Private notice shown to anyone clicking an alert that already has an owner.
pub const ALREADY_CLAIMED_MESSAGE: &str = "This alert has already been claimed.";

/// Storage for claimed alert ids.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Record a claim. Returns `true` only for the first call per id.
    async fn try_claim(&self, alert_id: AlertId) -> bool;

    async fn is_claimed(&self, alert_id: AlertId) -> bool;

    async fn claimed_count(&self) -> usize;
}

/// Process-local claim store. Not shared between instances.
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    claimed: Mutex<HashSet<AlertId>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn try_claim(&self, alert_id: AlertId) -> bool {
        self.claimed.lock().await.insert(alert_id)
    }

    async fn is_claimed(&self, alert_id: AlertId) -> bool {
        self.claimed.lock().await.contains(&alert_id)
    }

    async fn claimed_count(&self) -> usize {
        self.claimed.lock().await.len()
    }
}

/// What a claim click should do to the alert message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The clicker now owns the alert; the message should be updated with
    /// this attribution line and a disabled button.
    Claimed { attribution: String },
    /// Someone got there first; reply privately and leave the message alone.
    AlreadyClaimed,
}

/// Attempt to claim `alert_id` on behalf of `claimer`.
pub async fn claim_alert(
    store: &dyn ClaimStore,
    alert_id: AlertId,
    claimer: DiscordUserId,
) -> ClaimOutcome {
    if store.try_claim(alert_id).await {
        tracing::info!(alert_id, claimer, "Alert claimed");
        ClaimOutcome::Claimed {
            attribution: attribution(claimer),
        }
    } else {
        tracing::debug!(alert_id, claimer, "Alert already claimed");
        ClaimOutcome::AlreadyClaimed
    }
}

/// Line appended to a claimed alert, mentioning the claimer.
pub fn attribution(claimer: DiscordUserId) -> String {
    format!("Alert claimed by <@{claimer}>")
}
