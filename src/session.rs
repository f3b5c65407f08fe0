//! Session-scoped key-value storage holding the auth token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login flow writes `authToken`; the auth guard reads it on every
//! protected navigation and deletes it when the server rejects it.
//! `MemorySession` lives as long as the process, which is the session for a
//! native host. Hosts with their own store implement [`SessionStorage`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage key of the session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Minimal string key-value store with session lifetime.
///
/// Removing an absent key is a no-op.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Read the session token, treating an empty value as absent.
pub fn auth_token(storage: &dyn SessionStorage) -> Option<String> {
    storage.get_item(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySession {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session that already carries `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let session = Self::new();
        session.set_item(AUTH_TOKEN_KEY, token);
        session
    }
}

impl SessionStorage for MemorySession {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
