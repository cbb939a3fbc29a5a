//! Shared primitive types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discord snowflake of the message an alert was rendered into.
///
/// Alerts have no identity of their own once posted; the message id is
/// what claim tracking keys on.
pub type AlertId = u64;

/// Discord snowflake of a user.
pub type DiscordUserId = u64;

pub type Timestamp = DateTime<Utc>;

/// Roblox user id as reported by the game server.
///
/// Game scripts normally send a number, some send a pre-formatted string,
/// and a few send placeholders such as `-1` for guests. The id is only
/// displayed, so anything is accepted and rendered as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RobloxUserId {
    Numeric(u64),
    Text(String),
    Other(Value),
}

impl fmt::Display for RobloxUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobloxUserId::Numeric(id) => write!(f, "{id}"),
            RobloxUserId::Text(id) => f.write_str(id),
            RobloxUserId::Other(value) => write!(f, "{value}"),
        }
    }
}
