//! Shared response envelope types for API handlers.
//!
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// The teleport endpoints keep the `{ success, message }` / `{ requests }`
/// shapes the game scripts already parse and do not use this envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
