// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # propman-client
//!
//! HTTP access layer for the property management API. Every request goes
//! through one pipeline that authenticates it, retries it when the server
//! is rate limiting, and turns any failure into a message that can be shown
//! to the user.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use propman_client::{ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> propman_client::Result<()> {
//!     let client = ApiClient::new(ClientConfig::from_env()?)?;
//!
//!     // Sign in and keep the session
//!     let login = client.login("ana@example.com", "secret").await?;
//!     client.session_store().set(login.into_session())?;
//!
//!     match client.get_apartments().await {
//!         Ok(apartments) => println!("{apartments}"),
//!         Err(failure) => eprintln!("{}", failure.user_message()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Resource Operations                       │
//! │  apartments · payments · users · maintenance · notifications  │
//! │  damage reports · guests · login                              │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴────────────────────────────────┐
//! │ Retry Policy (429, 1s · 2s backoff, 3 attempts)               │
//! │   ┌─────────────┬─────────────┬────────────────────────────┐  │
//! │   │ Auth        │ Transport   │ Error Normalizer           │  │
//! │   │ Bearer from │ reqwest,    │ status → message,          │  │
//! │   │ SessionStore│ 10s timeout │ 401 → clear + Navigator    │  │
//! │   └─────────────┴─────────────┴────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Session storage
pub mod session;

/// Login redirect capability
pub mod navigation;

/// Request pipeline: auth, transport, normalization, retry
pub mod http;

/// Resource operations
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, RetryConfig};
pub use error::{Error, Result};
pub use http::{ApiClient, ApiResult, Failure, FailureKind, NetworkReason, RequestDescriptor};
pub use navigation::{MemoryNavigator, Navigator};
pub use resources::LoginResponse;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
