//! Error types for the propman client
//!
//! Two layers live in this crate. Network operations return
//! [`Failure`](crate::http::Failure), the normalized outcome of the request
//! pipeline. Everything around the pipeline (configuration, session
//! persistence, client construction) returns the [`Error`] defined here.

use crate::http::Failure;
use thiserror::Error;

/// The crate-level error type
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Session store error: {message}")]
    Session { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    Api(#[from] Failure),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a session store error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// The pipeline failure behind this error, if any
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Error::Api(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type alias for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FailureKind, NetworkReason};

    #[test]
    fn test_error_display() {
        let err = Error::config("missing base url");
        assert_eq!(err.to_string(), "Configuration error: missing base url");

        let err = Error::invalid_value("timeout", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'timeout': must be positive"
        );

        let err = Error::session("disk full");
        assert_eq!(err.to_string(), "Session store error: disk full");
    }

    #[test]
    fn test_api_error_displays_user_message() {
        let failure = Failure::new(
            FailureKind::Network {
                reason: NetworkReason::Unreachable,
            },
            "Connection error",
        );
        let err: Error = failure.into();
        assert_eq!(err.to_string(), "Connection error");
        assert!(err.as_failure().is_some());
        assert!(Error::config("x").as_failure().is_none());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
