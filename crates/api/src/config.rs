use std::str::FromStr;

use modbridge_core::teleport::QueuePolicy;

/// Where `/teleport` requests are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayBackend {
    /// Park requests in the in-process queue for the game server to poll.
    Queue,
    /// Invoke the game directly through Roblox Open Cloud.
    Direct,
}

impl FromStr for RelayBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queue" => Ok(RelayBackend::Queue),
            "direct" => Ok(RelayBackend::Direct),
            other => Err(format!("unknown teleport backend '{other}' (expected queue or direct)")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Teleport relay backend (default: queue).
    pub relay_backend: RelayBackend,
    /// Validation rules for queued teleport requests.
    pub queue_policy: QueuePolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `TELEPORT_BACKEND`        | `queue`                 |
    /// | `TELEPORT_REQUIRE_JOB_ID` | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let relay_backend: RelayBackend = std::env::var("TELEPORT_BACKEND")
            .unwrap_or_else(|_| "queue".into())
            .parse()
            .unwrap_or_else(|e| panic!("TELEPORT_BACKEND: {e}"));

        let require_job_id: bool = std::env::var("TELEPORT_REQUIRE_JOB_ID")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("TELEPORT_REQUIRE_JOB_ID must be `true` or `false`");

        Self {
            host,
            port,
            request_timeout_secs,
            relay_backend,
            queue_policy: QueuePolicy { require_job_id },
        }
    }
}
