use std::time::Duration;

/// Placeholder in [`OpenCloudConfig::invoke_url`] replaced by the universe id.
pub const UNIVERSE_PLACEHOLDER: &str = "{universe_id}";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Credentials and routing for the Roblox Open Cloud invocation endpoint.
#[derive(Debug, Clone)]
pub struct OpenCloudConfig {
    /// Open Cloud API key, sent as `x-api-key`.
    pub api_key: String,
    /// Numeric universe (experience) id the function runs in.
    pub universe_id: u64,
    /// Invocation endpoint. May contain `{universe_id}`.
    pub invoke_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OpenCloudConfig {
    /// Load Open Cloud configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `ROBLOX_API_KEY`      | **yes**  | --      |
    /// | `ROBLOX_UNIVERSE_ID`  | **yes**  | --      |
    /// | `ROBLOX_INVOKE_URL`   | **yes**  | --      |
    /// | `ROBLOX_TIMEOUT_SECS` | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or malformed. Only called
    /// when the direct teleport backend is selected.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("ROBLOX_API_KEY").expect("ROBLOX_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "ROBLOX_API_KEY must not be empty");

        let universe_id: u64 = std::env::var("ROBLOX_UNIVERSE_ID")
            .expect("ROBLOX_UNIVERSE_ID must be set in the environment")
            .parse()
            .expect("ROBLOX_UNIVERSE_ID must be a valid u64");

        let invoke_url = std::env::var("ROBLOX_INVOKE_URL")
            .expect("ROBLOX_INVOKE_URL must be set in the environment");

        let timeout_secs: u64 = std::env::var("ROBLOX_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("ROBLOX_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            universe_id,
            invoke_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The invocation URL with the universe id substituted in.
    pub fn resolved_invoke_url(&self) -> String {
        self.invoke_url
            .replace(UNIVERSE_PLACEHOLDER, &self.universe_id.to_string())
    }
}
