//! Transport layer
//!
//! Executes exactly one HTTP request and reports what happened. Retries,
//! authentication and message selection all live above this layer.

use super::failure::NetworkReason;
use super::request::RequestDescriptor;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A 2xx response with its JSON body (`Null` when the body was empty)
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed response body
    pub body: JsonValue,
}

/// Why the transport could not produce a successful response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportFailure {
    #[error("HTTP {status}")]
    Http {
        status: u16,
        body: Option<JsonValue>,
    },

    #[error("Network failure: {0}")]
    Network(NetworkReason),

    #[error("{0}")]
    Other(String),
}

/// Executes a single request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response or a transport failure
    async fn send(
        &self,
        request: &RequestDescriptor,
    ) -> std::result::Result<RawResponse, TransportFailure>;
}

/// Transport backed by reqwest
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    default_headers: HashMap<String, String>,
}

impl ReqwestTransport {
    /// Build a transport from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            default_headers: config.default_headers.clone(),
        })
    }

    /// Default headers overlaid with the request's own; one value per name
    fn merge_headers(
        &self,
        request: &RequestDescriptor,
    ) -> std::result::Result<HeaderMap, TransportFailure> {
        let mut headers = HeaderMap::new();

        for (key, value) in self.default_headers.iter().chain(&request.headers) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| TransportFailure::Other(format!("Invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportFailure::Other(format!("Invalid value for '{key}': {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        let url = self.build_url(&request.path);
        let timeout = request.timeout.unwrap_or(self.timeout);

        let mut req = self
            .client
            .request(request.method.into(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .timeout(timeout);

        req = req.headers(self.merge_headers(request)?);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        debug!("Sending {} {}", request.method, url);

        let response = req.send().await.map_err(|e| classify_error(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| classify_error(&e))?;

        if !status.is_success() {
            debug!("Request failed: {} {} -> {}", request.method, url, status.as_u16());
            return Err(TransportFailure::Http {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            });
        }

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| TransportFailure::Other(format!("Invalid JSON response: {e}")))?
        };

        debug!("Request succeeded: {} {} -> {}", request.method, url, status.as_u16());
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Map a reqwest error onto the transport taxonomy
fn classify_error(error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Network(NetworkReason::Timeout)
    } else if error.is_connect() || error.is_request() || error.is_body() {
        TransportFailure::Network(NetworkReason::Unreachable)
    } else {
        TransportFailure::Other(error.to_string())
    }
}
