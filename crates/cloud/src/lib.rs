//! Roblox Open Cloud integration.
//!
//! - [`OpenCloudClient`] -- authenticated calls to the game's invocation
//!   endpoint.
//! - [`DirectRelay`] -- the teleport relay backend built on it.

pub mod client;
pub mod config;
pub mod relay;

pub use client::{InvokeResponse, OpenCloudClient, OpenCloudError};
pub use config::OpenCloudConfig;
pub use relay::DirectRelay;
