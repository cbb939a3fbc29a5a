//! Moderation alerts reported by the game server.
//!
//! An [`AlertPayload`] arrives over HTTP, is validated into an [`Alert`],
//! rendered into an [`AlertNotice`] and handed to an [`AlertSink`] which
//! posts it to the moderators' channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{AlertId, RobloxUserId, Timestamp};

/// Custom id of the claim button attached to every alert notice.
pub const CLAIM_ALERT_ID: &str = "claim_alert";

pub const ALERT_TITLE: &str = "🚨 Suspicious Activity Detected";
pub const ALERT_COLOUR: u32 = 0xE7_4C_3C;
pub const CLAIM_LABEL: &str = "Claim Alert";
pub const CLAIMED_LABEL: &str = "Claimed";
pub const NO_DETAILS: &str = "No details provided";

/// User id placeholder when the game server omits `userId`.
const UNKNOWN_USER_ID: &str = "unknown";

/// Longest field value Discord accepts in an embed, in characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Raw alert body as posted by the game server.
///
/// Every field is optional at the serde level so a missing field becomes a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub player: Option<String>,
    pub user_id: Option<RobloxUserId>,
    pub flag_type: Option<String>,
    pub join_url: Option<String>,
    pub details: Option<String>,
}

impl AlertPayload {
    /// Check required fields and produce a well-formed [`Alert`].
    ///
    /// `player`, `flagType` and `joinUrl` must be present and non-empty;
    /// `userId` and `details` are optional.
    pub fn validate_alert(self) -> Result<Alert, CoreError> {
        let player = non_empty(self.player);
        let flag_type = non_empty(self.flag_type);
        let join_url = non_empty(self.join_url);

        let missing: Vec<&str> = [
            ("player", player.is_none()),
            ("flagType", flag_type.is_none()),
            ("joinUrl", join_url.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(player), Some(flag_type), Some(join_url)) = (player, flag_type, join_url) else {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        Ok(Alert {
            player,
            user_id: self.user_id,
            flag_type,
            join_url,
            details: non_empty(self.details),
            received_at: chrono::Utc::now(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// A validated alert, ready to be rendered.
#[derive(Debug, Clone)]
pub struct Alert {
    pub player: String,
    pub user_id: Option<RobloxUserId>,
    pub flag_type: String,
    pub join_url: String,
    pub details: Option<String>,
    pub received_at: Timestamp,
}

impl Alert {
    /// Render the notice moderators will see.
    pub fn notice(&self) -> AlertNotice {
        let user_id = self
            .user_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| UNKNOWN_USER_ID.to_string());

        AlertNotice {
            title: ALERT_TITLE.to_string(),
            colour: ALERT_COLOUR,
            fields: vec![
                NoticeField::inline("Player", format!("{} ({user_id})", self.player)),
                NoticeField::inline("Flag Type", self.flag_type.clone()),
                NoticeField::block(
                    "Details",
                    self.details.clone().unwrap_or_else(|| NO_DETAILS.to_string()),
                ),
            ],
            timestamp: self.received_at,
            control: NoticeControl::claim(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering model
// ---------------------------------------------------------------------------

/// Platform-neutral description of an alert message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertNotice {
    pub title: String,
    pub colour: u32,
    pub fields: Vec<NoticeField>,
    pub timestamp: Timestamp,
    pub control: NoticeControl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl NoticeField {
    pub fn inline(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value: clamp_value(value),
            inline: true,
        }
    }

    pub fn block(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value: clamp_value(value),
            inline: false,
        }
    }
}

/// Cut `value` to [`FIELD_VALUE_LIMIT`] characters, ending in `…` when shortened.
fn clamp_value(value: String) -> String {
    if value.chars().count() <= FIELD_VALUE_LIMIT {
        return value;
    }
    let mut clamped: String = value.chars().take(FIELD_VALUE_LIMIT - 1).collect();
    clamped.push('…');
    clamped
}

/// The single button attached to an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeControl {
    pub custom_id: String,
    pub label: String,
    pub disabled: bool,
}

impl NoticeControl {
    /// Enabled "Claim Alert" button.
    pub fn claim() -> Self {
        Self {
            custom_id: CLAIM_ALERT_ID.to_string(),
            label: CLAIM_LABEL.to_string(),
            disabled: false,
        }
    }

    /// Disabled "Claimed" button shown once an alert has an owner.
    pub fn claimed() -> Self {
        Self {
            custom_id: CLAIM_ALERT_ID.to_string(),
            label: CLAIMED_LABEL.to_string(),
            disabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Result of a successful delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveredAlert {
    /// Id of the posted message; later claims are keyed on it.
    pub alert_id: AlertId,
}

/// Destination for rendered alerts.
///
/// Exactly one message is created per successful call. Failures are not
/// retried.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, notice: &AlertNotice) -> Result<DeliveredAlert, CoreError>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn payload() -> AlertPayload {
        AlertPayload {
            player: Some("Bob".into()),
            user_id: Some(RobloxUserId::Numeric(123)),
            flag_type: Some("Speed".into()),
            join_url: Some("x".into()),
            details: None,
        }
    }

    #[test]
    fn valid_payload_renders_player_and_flag_fields() {
        let notice = payload().validate_alert().unwrap().notice();

        assert_eq!(notice.title, ALERT_TITLE);
        assert_eq!(notice.colour, 0xE74C3C);
        assert_eq!(notice.fields[0].value, "Bob (123)");
        assert!(notice.fields[0].inline);
        assert_eq!(notice.fields[1].name, "Flag Type");
        assert_eq!(notice.fields[1].value, "Speed");
        assert_eq!(notice.fields[2].value, NO_DETAILS);
        assert!(!notice.fields[2].inline);
    }

    #[test]
    fn notice_carries_enabled_claim_control() {
        let notice = payload().validate_alert().unwrap().notice();
        assert_eq!(notice.control.custom_id, "claim_alert");
        assert_eq!(notice.control.label, "Claim Alert");
        assert!(!notice.control.disabled);
    }

    #[test]
    fn details_are_rendered_when_present() {
        let mut p = payload();
        p.details = Some("moved 400 studs in one frame".into());
        let notice = p.validate_alert().unwrap().notice();
        assert_eq!(notice.fields[2].value, "moved 400 studs in one frame");
    }

    #[test]
    fn missing_user_id_is_allowed() {
        let mut p = payload();
        p.user_id = None;
        let notice = p.validate_alert().unwrap().notice();
        assert_eq!(notice.fields[0].value, "Bob (unknown)");
    }

    #[test]
    fn string_user_id_renders_verbatim() {
        let mut p = payload();
        p.user_id = Some(RobloxUserId::Text("98765".into()));
        let notice = p.validate_alert().unwrap().notice();
        assert_eq!(notice.fields[0].value, "Bob (98765)");
    }

    #[test]
    fn missing_player_is_rejected() {
        let mut p = payload();
        p.player = None;
        let err = p.validate_alert().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Missing required fields: player");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let mut p = payload();
        p.flag_type = Some(String::new());
        p.join_url = Some(String::new());
        let err = p.validate_alert().unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg) if msg == "Missing required fields: flagType, joinUrl"
        );
    }

    #[test]
    fn long_details_are_clamped_to_field_limit() {
        let mut p = payload();
        p.details = Some("a".repeat(2000));
        let notice = p.validate_alert().unwrap().notice();

        let details = &notice.fields[2].value;
        assert_eq!(details.chars().count(), FIELD_VALUE_LIMIT);
        assert!(details.ends_with('…'));
    }

    #[test]
    fn clamping_respects_multibyte_characters() {
        let clamped = clamp_value("é".repeat(FIELD_VALUE_LIMIT + 5));
        assert_eq!(clamped.chars().count(), FIELD_VALUE_LIMIT);
        assert!(clamped.starts_with("éé"));

        let exact = "é".repeat(FIELD_VALUE_LIMIT);
        assert_eq!(clamp_value(exact.clone()), exact);
    }

    #[test]
    fn all_missing_fields_are_listed() {
        let err = AlertPayload::default().validate_alert().unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg) if msg == "Missing required fields: player, flagType, joinUrl"
        );
    }

    #[test]
    fn payload_deserializes_camel_case() {
        let p: AlertPayload = serde_json::from_value(serde_json::json!({
            "player": "Bob",
            "userId": 123,
            "flagType": "Speed",
            "joinUrl": "x",
        }))
        .unwrap();
        assert_eq!(p.user_id, Some(RobloxUserId::Numeric(123)));
        assert_eq!(p.flag_type.as_deref(), Some("Speed"));
        assert!(p.details.is_none());
    }
}
