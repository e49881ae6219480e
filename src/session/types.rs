//! Session types

use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated session: bearer token plus the signed-in user's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the login endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// User profile as returned by the login endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<JsonValue>,
    /// When the session was written to the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session stamped with the current time
    pub fn new(token: impl Into<String>, user: Option<JsonValue>) -> Self {
        Self {
            token: Some(token.into()),
            user,
            stored_at: Some(Utc::now()),
        }
    }

    /// True when a non-empty token is present
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// True when neither token nor user is present
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_new_is_authenticated() {
        let session = Session::new("abc", Some(json!({"id": 7})));
        assert!(session.is_authenticated());
        assert!(!session.is_empty());
        assert!(session.stored_at.is_some());
    }

    #[test]
    fn test_session_default_is_empty() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.is_empty());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session::new("", None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_serialization_skips_missing_fields() {
        let json = serde_json::to_value(Session::default()).unwrap();
        assert_eq!(json, json!({}));
    }
}
