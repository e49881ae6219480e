//! Navigation notifier
//!
//! The error normalizer sends the user to the login screen when the server
//! rejects their session. The host application decides what "navigating"
//! means by implementing [`Navigator`].

use std::sync::{PoisonError, RwLock};
use tracing::info;

/// Host capability for reading and changing the current UI location
pub trait Navigator: Send + Sync {
    /// Location the user is currently on
    fn current_location(&self) -> String;

    /// Move the user to `location`
    fn navigate(&self, location: &str);
}

/// Navigator that tracks the location in memory and records every move
#[derive(Debug)]
pub struct MemoryNavigator {
    location: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl MemoryNavigator {
    /// Start at `location`
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(location.into()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Locations navigated to, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of navigations performed
    pub fn navigation_count(&self) -> usize {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> String {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, location: &str) {
        info!(location, "Navigating");
        *self.location.write().unwrap_or_else(PoisonError::into_inner) = location.to_string();
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_navigator_default_location() {
        let nav = MemoryNavigator::default();
        assert_eq!(nav.current_location(), "/");
        assert_eq!(nav.navigation_count(), 0);
    }

    #[test]
    fn test_memory_navigator_records_history() {
        let nav = MemoryNavigator::new("/apartments");
        nav.navigate("/login");
        nav.navigate("/dashboard");

        assert_eq!(nav.current_location(), "/dashboard");
        assert_eq!(nav.history(), vec!["/login", "/dashboard"]);
    }
}
