//! Tests for the session stores

use super::*;
use crate::error::Error;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

// ============================================================================
// Memory Store Tests
// ============================================================================

#[test]
fn test_memory_store_starts_empty() {
    let store = MemorySessionStore::new();
    assert!(store.get().is_empty());
    assert!(store.token().is_none());
    assert!(store.user().is_none());
}

#[test]
fn test_memory_store_set_and_clear() {
    let store = MemorySessionStore::new();
    store
        .set(Session::new("tok-1", Some(json!({"name": "Ana"}))))
        .unwrap();

    assert_eq!(store.token(), Some("tok-1".to_string()));
    assert_eq!(store.user(), Some(json!({"name": "Ana"})));

    store.clear().unwrap();
    assert!(store.token().is_none());
    assert!(store.user().is_none());
}

#[test]
fn test_memory_store_ignores_empty_token() {
    let store = MemorySessionStore::with_session(Session::new("", None));
    assert!(store.token().is_none());
}

#[test]
fn test_memory_store_as_trait_object() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    store.set(Session::new("shared", None)).unwrap();

    let clone = Arc::clone(&store);
    assert_eq!(clone.token(), Some("shared".to_string()));
}

// ============================================================================
// File Store Tests
// ============================================================================

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::open(dir.path().join("session.json")).unwrap();
    assert!(store.get().is_empty());
}

#[test]
fn test_file_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = FileSessionStore::open(&path).unwrap();
        store
            .set(Session::new("persisted", Some(json!({"id": 3, "role": "admin"}))))
            .unwrap();
    }

    let reopened = FileSessionStore::open(&path).unwrap();
    assert_eq!(reopened.token(), Some("persisted".to_string()));
    assert_eq!(reopened.user(), Some(json!({"id": 3, "role": "admin"})));
    assert!(reopened.get().stored_at.is_some());
}

#[test]
fn test_file_store_clear_removes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    store.set(Session::new("gone-soon", None)).unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());
    assert!(store.token().is_none());

    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_file_store_failed_clear_keeps_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    store.set(Session::new("still-here", None)).unwrap();

    // A directory in place of the file cannot be removed with remove_file
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let result = store.clear();
    assert!(matches!(result, Err(Error::Session { .. })));
    assert_eq!(store.token().as_deref(), Some("still-here"));
}

#[test]
fn test_file_store_clear_without_file_is_ok() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::open(dir.path().join("never-written.json")).unwrap();

    store.clear().unwrap();
    assert!(store.get().is_empty());
}

#[test]
fn test_file_store_no_temp_file_left() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    store.set(Session::new("tok", None)).unwrap();

    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn test_file_store_rejects_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = FileSessionStore::open(&path);
    assert!(matches!(
        result,
        Err(crate::error::Error::Session { .. })
    ));
}
