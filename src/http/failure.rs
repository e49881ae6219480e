//! Failure descriptor
//!
//! The only error type a network operation hands back. It keeps the raw
//! classification for programmatic use and always carries a message that
//! can be shown to the user as-is.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Message used when a failure has neither a server payload nor a message
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Check your network and try again.";

/// Message used when a failure arrives without any message
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Result type of every pipeline operation
pub type ApiResult<T> = std::result::Result<T, Failure>;

/// Why no response was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkReason {
    /// The request exceeded its timeout
    Timeout,
    /// The server could not be reached
    Unreachable,
}

impl fmt::Display for NetworkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkReason::Timeout => f.write_str("timeout"),
            NetworkReason::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Classification of a failed request
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// The server answered with a non-2xx status
    Http {
        status: u16,
        body: Option<JsonValue>,
    },
    /// No response was received
    Network { reason: NetworkReason },
    /// Anything the other two variants do not describe
    Unexpected { detail: String },
}

/// A normalized request failure
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{user_message}")]
pub struct Failure {
    kind: FailureKind,
    user_message: String,
}

impl Failure {
    /// Create a failure; an empty message is replaced by the generic one
    pub fn new(kind: FailureKind, user_message: impl Into<String>) -> Self {
        let mut user_message = user_message.into();
        if user_message.trim().is_empty() {
            user_message = UNEXPECTED_ERROR_MESSAGE.to_string();
        }
        Self { kind, user_message }
    }

    /// The original classification
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// Message ready for display
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// HTTP status, for server-classified failures
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Http { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Structured body sent by the server, if any
    pub fn body(&self) -> Option<&JsonValue> {
        match &self.kind {
            FailureKind::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Network reason, for failures without a response
    pub fn network_reason(&self) -> Option<NetworkReason> {
        match self.kind {
            FailureKind::Network { reason } => Some(reason),
            _ => None,
        }
    }

    /// 429 Too Many Requests
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The request hit its timeout
    pub fn is_timeout(&self) -> bool {
        self.network_reason() == Some(NetworkReason::Timeout)
    }

    /// The server's payload, or a generic connection-error object
    pub fn payload(&self) -> JsonValue {
        self.body()
            .cloned()
            .unwrap_or_else(|| json!({ "error": CONNECTION_ERROR_MESSAGE }))
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn test_http_failure_accessors() {
        let failure = Failure::new(
            FailureKind::Http {
                status: 422,
                body: Some(json!({"error": "email taken", "field": "email"})),
            },
            "email taken",
        );

        assert_eq!(failure.status(), Some(422));
        assert_eq!(failure.user_message(), "email taken");
        assert_eq!(failure.payload()["field"], "email");
        assert!(failure.network_reason().is_none());
        assert!(!failure.is_rate_limited());
    }

    #[test]
    fn test_network_failure_payload_fallback() {
        let failure = Failure::new(
            FailureKind::Network {
                reason: NetworkReason::Timeout,
            },
            "too slow",
        );

        assert!(failure.is_timeout());
        assert!(failure.status().is_none());
        assert_eq!(
            failure.payload(),
            json!({"error": CONNECTION_ERROR_MESSAGE})
        );
    }

    #[test]
    fn test_empty_message_replaced() {
        let failure = Failure::new(
            FailureKind::Unexpected {
                detail: "boom".to_string(),
            },
            "   ",
        );
        assert_eq!(failure.user_message(), UNEXPECTED_ERROR_MESSAGE);
        assert_eq!(failure.to_string(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn test_network_reason_serialization() {
        assert_eq!(
            serde_json::to_value(NetworkReason::Timeout).unwrap(),
            json!("timeout")
        );
        assert_eq!(NetworkReason::Unreachable.to_string(), "unreachable");
    }
}
