//! Teleport relay that calls into the game through Open Cloud.

use async_trait::async_trait;
use modbridge_core::relay::{RelayAck, RelayError, TeleportRelay};
use modbridge_core::teleport::TeleportRequest;

use crate::client::{OpenCloudClient, OpenCloudError};

/// Forwards each request synchronously; nothing is queued.
pub struct DirectRelay {
    client: OpenCloudClient,
}

impl DirectRelay {
    pub fn new(client: OpenCloudClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TeleportRelay for DirectRelay {
    fn backend(&self) -> &'static str {
        "direct"
    }

    async fn relay(&self, request: TeleportRequest) -> Result<RelayAck, RelayError> {
        let arguments = [
            request.mod_username.as_str(),
            request.target_username.as_str(),
        ];

        match self.client.invoke(&arguments).await {
            Ok(response) => {
                tracing::info!(
                    moderator = %request.mod_username,
                    target_player = %request.target_username,
                    success = response.success,
                    "Teleport invoked via Open Cloud"
                );
                Ok(RelayAck {
                    success: response.success,
                    message: response.message,
                })
            }
            Err(err) => {
                tracing::warn!(
                    moderator = %request.mod_username,
                    target_player = %request.target_username,
                    error = %err,
                    "Open Cloud teleport invocation failed"
                );
                Err(err.into())
            }
        }
    }
}

impl From<OpenCloudError> for RelayError {
    fn from(err: OpenCloudError) -> Self {
        match err {
            OpenCloudError::Request(_) => RelayError::Transport(err.detail()),
            OpenCloudError::Api { .. } | OpenCloudError::Decode(_) => {
                RelayError::Remote(err.detail())
            }
        }
    }
}
