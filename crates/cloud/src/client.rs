//! HTTP client for the Roblox Open Cloud function invocation endpoint.
//!
//! Sends `POST {invoke_url}` with the API key in `x-api-key` and a body of
//! `{"arguments": [...]}`. The game answers `{"success": bool, "message": string}`;
//! anything else is treated as an error and mined for the most specific
//! detail available.

use serde::Deserialize;
use serde_json::Value;

use crate::config::OpenCloudConfig;

const API_KEY_HEADER: &str = "x-api-key";

/// Successful answer from the invoked game function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvokeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Errors from the Open Cloud layer.
#[derive(Debug, thiserror::Error)]
pub enum OpenCloudError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Open Cloud answered with a non-2xx status.
    #[error("Open Cloud API error ({status}): {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Best available description of the failure.
        detail: String,
    },

    /// A 2xx answer that is not an invocation result.
    #[error("Unexpected Open Cloud response: {0}")]
    Decode(String),
}

impl OpenCloudError {
    /// Text suitable for showing to the moderator.
    pub fn detail(&self) -> String {
        match self {
            OpenCloudError::Request(err) => err.to_string(),
            OpenCloudError::Api { detail, .. } => detail.clone(),
            OpenCloudError::Decode(detail) => detail.clone(),
        }
    }
}

pub struct OpenCloudClient {
    client: reqwest::Client,
    api_key: String,
    invoke_url: String,
}

impl OpenCloudClient {
    pub fn new(config: &OpenCloudConfig) -> Result<Self, OpenCloudError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &OpenCloudConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            invoke_url: config.resolved_invoke_url(),
        }
    }

    /// Invoke the game function with positional `arguments`.
    pub async fn invoke(&self, arguments: &[&str]) -> Result<InvokeResponse, OpenCloudError> {
        let body = serde_json::json!({ "arguments": arguments });

        let response = self
            .client
            .post(&self.invoke_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = error_detail(&text).unwrap_or_else(|| status.to_string());
            return Err(OpenCloudError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        parse_invoke_response(&text)
    }
}

fn parse_invoke_response(text: &str) -> Result<InvokeResponse, OpenCloudError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) if value.get("success").is_some_and(Value::is_boolean) => {
            serde_json::from_value(value).map_err(|e| OpenCloudError::Decode(e.to_string()))
        }
        _ => Err(OpenCloudError::Decode(
            error_detail(text).unwrap_or_else(|| "empty response body".to_string()),
        )),
    }
}

/// Extract the most specific error description from a response body.
///
/// In order of preference: the structured `errors` list joined as
/// `code: message`, a plain `message`/`error` string, a raw (non-JSON or
/// JSON string) body, and finally the body re-serialized. Returns `None`
/// for an empty body so the caller can fall back to the status or
/// transport error.
pub fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return Some(trimmed.to_string()),
    };

    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let joined: Vec<String> = errors.iter().filter_map(describe_error_entry).collect();
        if !joined.is_empty() {
            return Some(joined.join("; "));
        }
    }

    if let Value::String(s) = &value {
        return Some(s.clone());
    }

    for key in ["message", "error"] {
        if let Some(s) = value.get(key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }

    Some(value.to_string())
}

fn describe_error_entry(entry: &Value) -> Option<String> {
    let message = entry.get("message").and_then(Value::as_str);
    let code = entry.get("code").map(|c| match c {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    match (code, message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message.to_string()),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}
