//! Domain logic for the Roblox moderation bridge.
//!
//! Nothing in here knows about HTTP or Discord: alert validation and
//! rendering, claim tracking, the teleport queue, relay backends and role
//! checks are all expressed against plain types and small async traits so
//! the adapters stay thin.

pub mod alert;
pub mod claim;
pub mod error;
pub mod relay;
pub mod roles;
pub mod teleport;
pub mod types;
