//! Tab-scoped key-value storage seam.
//!
//! The draft store does not talk to a browser directly; it takes anything
//! implementing [`SessionStore`], which mirrors the host storage contract
//! (`getItem`/`setItem`/`removeItem`, synchronous and non-throwing).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Minimal capability of a tab/session-scoped string store.
///
/// All operations are infallible from the caller's perspective; a host that
/// cannot persist simply behaves as if nothing was ever written.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

/// In-memory store for tests and hosts without session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Store for contexts with no storage at all (server-side rendering).
/// Reads see nothing, writes go nowhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl SessionStore for NullStore {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) {}

    fn remove_item(&self, _key: &str) {}
}
