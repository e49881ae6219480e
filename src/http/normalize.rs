//! Error normalization
//!
//! Every transport outcome passes through [`ErrorNormalizer::intercept`].
//! Successes are handed back untouched. Failures are classified and given a
//! message from [`UserMessages`]; a 401 additionally tears down the session
//! and sends the user to the login screen.

use super::failure::{ApiResult, Failure, FailureKind, NetworkReason};
use super::failure::{CONNECTION_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
use super::transport::{RawResponse, TransportFailure};
use crate::navigation::Navigator;
use crate::session::SessionStore;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// User-facing failure messages, overridable for localization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserMessages {
    /// 400 without a server-provided error
    pub invalid_data: String,
    /// 401
    pub session_expired: String,
    /// 403
    pub forbidden: String,
    /// 404
    pub not_found: String,
    /// 422 without a server-provided error
    pub invalid_input: String,
    /// 429
    pub rate_limited: String,
    /// 500
    pub server_error: String,
    /// Any other status without a server-provided error; `{status}` is replaced
    pub status_error: String,
    /// Request exceeded its timeout
    pub timeout: String,
    /// Server unreachable
    pub connection_error: String,
    /// Nothing else matched
    pub unexpected: String,
}

impl Default for UserMessages {
    fn default() -> Self {
        Self {
            invalid_data: "Invalid data".to_string(),
            session_expired: "Your session has expired. Please sign in again.".to_string(),
            forbidden: "You do not have permission to perform this action".to_string(),
            not_found: "Resource not found".to_string(),
            invalid_input: "Invalid input".to_string(),
            rate_limited: "Too many requests, retrying automatically".to_string(),
            server_error: "Internal server error".to_string(),
            status_error: "Error {status}".to_string(),
            timeout: "The request took too long. Please try again.".to_string(),
            connection_error: CONNECTION_ERROR_MESSAGE.to_string(),
            unexpected: UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Turns transport failures into [`Failure`]s
#[derive(Clone)]
pub struct ErrorNormalizer {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    messages: UserMessages,
    login_path: String,
}

impl ErrorNormalizer {
    /// Create a normalizer
    pub fn new(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        messages: UserMessages,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            navigator,
            messages,
            login_path: login_path.into(),
        }
    }

    /// Pass successes through, normalize failures
    pub fn intercept(
        &self,
        outcome: std::result::Result<RawResponse, TransportFailure>,
    ) -> ApiResult<RawResponse> {
        outcome.map_err(|failure| self.normalize(failure))
    }

    /// Classify a transport failure. Never fails.
    pub fn normalize(&self, failure: TransportFailure) -> Failure {
        match failure {
            TransportFailure::Http { status, body } => {
                let message = self.message_for_status(status, body.as_ref());
                if status == 401 {
                    self.end_session();
                }
                debug!(status, message = %message, "Normalized HTTP failure");
                Failure::new(FailureKind::Http { status, body }, message)
            }
            TransportFailure::Network(reason) => {
                let message = match reason {
                    NetworkReason::Timeout => &self.messages.timeout,
                    NetworkReason::Unreachable => &self.messages.connection_error,
                };
                debug!(%reason, "Normalized network failure");
                Failure::new(FailureKind::Network { reason }, message.clone())
            }
            TransportFailure::Other(detail) => self.unexpected(detail),
        }
    }

    /// Failure for outcomes outside the HTTP/network taxonomy
    pub fn unexpected(&self, detail: impl Into<String>) -> Failure {
        let detail = detail.into();
        warn!(detail = %detail, "Unexpected request failure");
        Failure::new(
            FailureKind::Unexpected { detail },
            self.messages.unexpected.clone(),
        )
    }

    /// Message for a non-2xx status
    pub fn message_for_status(&self, status: u16, body: Option<&JsonValue>) -> String {
        let server_error = body
            .and_then(|b| b.get("error"))
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match status {
            400 => server_error.map_or_else(|| self.messages.invalid_data.clone(), String::from),
            401 => self.messages.session_expired.clone(),
            403 => self.messages.forbidden.clone(),
            404 => self.messages.not_found.clone(),
            422 => server_error.map_or_else(|| self.messages.invalid_input.clone(), String::from),
            429 => self.messages.rate_limited.clone(),
            500 => self.messages.server_error.clone(),
            _ => server_error.map_or_else(
                || {
                    self.messages
                        .status_error
                        .replace("{status}", &status.to_string())
                },
                String::from,
            ),
        }
    }

    /// Clear the session and leave for the login screen unless already there
    fn end_session(&self) {
        warn!("Server rejected the session, signing out");
        if let Err(e) = self.session.clear() {
            warn!("Failed to clear session: {e}");
        }

        if !self.on_login_surface() {
            self.navigator.navigate(&self.login_path);
        }
    }

    fn on_login_surface(&self) -> bool {
        let location = self.navigator.current_location();
        let path = location.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/') == self.login_path.trim_end_matches('/')
    }
}

impl std::fmt::Debug for ErrorNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorNormalizer")
            .field("login_path", &self.login_path)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}
