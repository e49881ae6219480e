//! HTTP request pipeline
//!
//! Every network call made by the client goes through the same steps.
//!
//! # Features
//!
//! - **Authentication**: bearer token read from the session store per attempt
//! - **Error Normalization**: status/network failures mapped to display messages
//! - **Session Teardown**: 401 clears the session and redirects to login
//! - **Rate-Limit Retries**: 429 retried with exponential backoff

mod auth;
mod client;
mod failure;
mod normalize;
mod request;
mod retry;
mod transport;

pub use auth::{AuthInterceptor, AUTHORIZATION};
pub use client::{ApiClient, ApiClientBuilder};
pub use failure::{
    ApiResult, Failure, FailureKind, NetworkReason, CONNECTION_ERROR_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE,
};
pub use normalize::{ErrorNormalizer, UserMessages};
pub use request::RequestDescriptor;
pub use retry::RetryPolicy;
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportFailure};
