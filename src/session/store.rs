//! Session store implementations
//!
//! The pipeline only ever reads the token and clears the session. Writing a
//! new session is the login flow's job.

use super::types::Session;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Persistence for the authenticated session
pub trait SessionStore: Send + Sync {
    /// Snapshot of the stored session
    fn get(&self) -> Session;

    /// Replace the stored session
    fn set(&self, session: Session) -> Result<()>;

    /// Remove token and user
    fn clear(&self) -> Result<()>;

    /// Current bearer token, if any
    fn token(&self) -> Option<String> {
        self.get().token.filter(|t| !t.is_empty())
    }

    /// Current user profile, if any
    fn user(&self) -> Option<JsonValue> {
        self.get().user
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Session store that lives for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: Session) -> Result<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Session store persisted as a JSON file, so a session survives restarts
#[derive(Debug)]
pub struct FileSessionStore {
    /// Path to the session file
    path: PathBuf,
    /// Cached copy of the file contents
    session: RwLock<Session>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading an existing session if present
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let session = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::session(format!("Failed to read session file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::session(format!("Failed to parse session file: {e}")))?
        } else {
            Session::default()
        };

        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, session: &Session) -> Result<()> {
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| Error::session(format!("Failed to serialize session: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, contents)
            .map_err(|e| Error::session(format!("Failed to write session file: {e}")))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::session(format!("Failed to rename session file: {e}")))?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: Session) -> Result<()> {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        self.write_file(&session)?;
        *guard = session;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);

        // Disk first: on failure the cached session still matches the file
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Session file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::session(format!("Failed to remove session file: {e}")));
            }
        }

        *guard = Session::default();
        Ok(())
    }
}
