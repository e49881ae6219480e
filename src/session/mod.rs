//! Session module
//!
//! Holds the bearer token and user profile the pipeline authenticates with.
//!
//! # Overview
//!
//! - `Session` - token, user profile and the time it was stored
//! - `SessionStore` - get/set/clear interface injected into the client
//! - `MemorySessionStore` - process-lifetime store
//! - `FileSessionStore` - JSON file store that survives restarts

mod store;
mod types;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::Session;

#[cfg(test)]
mod tests;
