//! Common types used throughout the propman client
//!
//! Shared type aliases, the HTTP method enum and the response envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Server response wrapper: `{ "data": T, ...metadata }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The payload handed back to callers
    pub data: T,
    /// Everything else the server sent next to `data`
    #[serde(flatten)]
    pub meta: JsonObject,
}

impl<T> Envelope<T> {
    /// Discard metadata and return the payload
    pub fn into_data(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::DELETE), reqwest::Method::DELETE);
        assert_eq!(Method::PUT.to_string(), "PUT");
    }

    #[test]
    fn test_envelope_keeps_metadata() {
        let envelope: Envelope<JsonValue> = serde_json::from_value(json!({
            "data": [{"id": 1}],
            "total": 1,
            "success": true
        }))
        .unwrap();

        assert_eq!(envelope.meta.get("total"), Some(&json!(1)));
        assert_eq!(envelope.into_data(), json!([{"id": 1}]));
    }

    #[test]
    fn test_envelope_requires_data() {
        let result: std::result::Result<Envelope<JsonValue>, _> =
            serde_json::from_value(json!({"message": "ok"}));
        assert!(result.is_err());
    }
}
