//! API client
//!
//! Composes the request pipeline:
//! - Auth interceptor adds the bearer token
//! - Transport sends the request
//! - Error normalizer classifies the outcome
//! - Retry policy repeats rate-limited calls
//! - Envelope unwrapping hands `data` back to the caller

use super::auth::AuthInterceptor;
use super::failure::ApiResult;
use super::normalize::ErrorNormalizer;
use super::request::RequestDescriptor;
use super::retry::RetryPolicy;
use super::transport::{RawResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::navigation::{MemoryNavigator, Navigator};
use crate::session::{MemorySessionStore, Session, SessionStore};
use crate::types::{Envelope, JsonValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Client for the property management API
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    auth: AuthInterceptor,
    normalizer: ErrorNormalizer,
    retry: RetryPolicy,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client with an in-memory session and navigator
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Create a client from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Start building a client
    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session store the client authenticates from
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Snapshot of the stored session
    pub fn current_session(&self) -> Session {
        self.session.get()
    }

    /// Explicit logout: forget token and user
    pub fn logout(&self) -> Result<()> {
        debug!("Logging out");
        self.session.clear()
    }

    /// Retry policy in use
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a request through the pipeline and return the whole body
    pub async fn send(&self, request: RequestDescriptor) -> ApiResult<JsonValue> {
        let response = self.retry.run(|| self.attempt(&request)).await?;
        Ok(response.body)
    }

    /// Send a request and return the envelope's `data`
    pub async fn fetch<T: DeserializeOwned>(&self, request: RequestDescriptor) -> ApiResult<T> {
        let body = self.send(request).await?;
        serde_json::from_value::<Envelope<T>>(body)
            .map(Envelope::into_data)
            .map_err(|e| {
                self.normalizer
                    .unexpected(format!("Malformed response envelope: {e}"))
            })
    }

    /// Send a request and deserialize the whole body
    pub async fn fetch_raw<T: DeserializeOwned>(&self, request: RequestDescriptor) -> ApiResult<T> {
        let body = self.send(request).await?;
        serde_json::from_value(body)
            .map_err(|e| self.normalizer.unexpected(format!("Malformed response: {e}")))
    }

    /// One pass through auth, transport and normalization
    async fn attempt(&self, request: &RequestDescriptor) -> ApiResult<RawResponse> {
        let outgoing = self.auth.apply(request);
        let outcome = self.transport.send(&outgoing).await;
        self.normalizer.intercept(outcome)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("authenticated", &self.session.token().is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiClientBuilder {
    /// Start from `config`
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            navigator: None,
            transport: None,
        }
    }

    /// Use `session` instead of an in-memory store
    pub fn session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Use `navigator` for the login redirect
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Use `transport` instead of reqwest
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };
        let session: Arc<dyn SessionStore> = match self.session {
            Some(session) => session,
            None => Arc::new(MemorySessionStore::new()),
        };
        let navigator: Arc<dyn Navigator> = match self.navigator {
            Some(navigator) => navigator,
            None => Arc::new(MemoryNavigator::default()),
        };

        let normalizer = ErrorNormalizer::new(
            Arc::clone(&session),
            navigator,
            self.config.messages.clone(),
            self.config.login_path.clone(),
        );

        Ok(ApiClient {
            auth: AuthInterceptor::new(Arc::clone(&session)),
            retry: RetryPolicy::from(self.config.retry),
            config: self.config,
            transport,
            normalizer,
            session,
        })
    }
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("config", &self.config)
            .field("has_session_store", &self.session.is_some())
            .field("has_navigator", &self.navigator.is_some())
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}
