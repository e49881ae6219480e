//! Login

use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::session::Session;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Payload returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Profile of the signed-in user
    #[serde(default)]
    pub user: Option<JsonValue>,
}

impl LoginResponse {
    /// Session to hand to a [`SessionStore`](crate::session::SessionStore)
    pub fn into_session(self) -> Session {
        Session::new(self.token, self.user)
    }
}

impl ApiClient {
    /// `POST /auth/login`
    ///
    /// Storing the returned session is left to the caller; the pipeline
    /// never writes a token on its own.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> ApiResult<LoginResponse> {
        let body = json!({
            "email": email.into(),
            "password": password.into(),
        });
        self.fetch(RequestDescriptor::post("/auth/login", body)).await
    }
}
