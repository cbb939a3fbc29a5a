//! Discord side of the moderation bridge.
//!
//! - [`DiscordAlertSink`] -- posts alert notices to the alert channel.
//! - [`Handler`] -- gateway handler for claim buttons and `/teleport`.
//! - [`commands`] -- slash command definitions and registration.

pub mod commands;
pub mod config;
pub mod embed;
pub mod handler;
pub mod sink;

pub use config::DiscordConfig;
pub use handler::Handler;
pub use sink::DiscordAlertSink;
