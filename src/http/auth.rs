//! Bearer token injection

use super::request::RequestDescriptor;
use crate::session::SessionStore;
use std::sync::Arc;

/// Header the bearer token is sent in
pub const AUTHORIZATION: &str = "Authorization";

/// Adds `Authorization: Bearer <token>` when the session holds a token
#[derive(Clone)]
pub struct AuthInterceptor {
    session: Arc<dyn SessionStore>,
}

impl AuthInterceptor {
    /// Create an interceptor reading from `session`
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Derive the descriptor that is actually sent.
    ///
    /// The token is read at call time, so a retried request picks up
    /// whatever the store holds at that moment.
    pub fn apply(&self, request: &RequestDescriptor) -> RequestDescriptor {
        match self.session.token() {
            Some(token) => request
                .clone()
                .without_header(AUTHORIZATION)
                .header(AUTHORIZATION, format!("Bearer {token}")),
            None => request.clone(),
        }
    }
}

impl std::fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("has_token", &self.session.token().is_some())
            .finish()
    }
}
