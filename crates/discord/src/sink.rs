use std::sync::Arc;

use async_trait::async_trait;
use modbridge_core::alert::{AlertNotice, AlertSink, DeliveredAlert};
use modbridge_core::error::CoreError;
use serenity::all::{ChannelId, Http};

use crate::embed::alert_message;

/// Posts alert notices to a fixed Discord channel over REST.
///
/// Works before the gateway is connected; only the bot token is needed.
pub struct DiscordAlertSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordAlertSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl AlertSink for DiscordAlertSink {
    async fn deliver(&self, notice: &AlertNotice) -> Result<DeliveredAlert, CoreError> {
        let message = self
            .channel_id
            .send_message(&self.http, alert_message(notice))
            .await
            .map_err(|err| {
                CoreError::Internal(format!(
                    "failed to post alert to channel {}: {err}",
                    self.channel_id
                ))
            })?;

        tracing::info!(
            channel_id = %self.channel_id,
            message_id = %message.id,
            "Alert posted to Discord"
        );

        Ok(DeliveredAlert {
            alert_id: message.id.get(),
        })
    }
}
