//! Global user list store.
//!
//! DESIGN
//! ======
//! One `UserStore` is created at startup and shared by `Arc`. The list is
//! held as an immutable snapshot behind an `RwLock`; a successful fetch swaps
//! in a whole new snapshot, so readers see either the old list or the new
//! one and never a mix. Fetch failures are logged and leave the list alone.

use std::sync::{Arc, PoisonError, RwLock};

use crate::net::api::BlogApi;
use crate::net::types::UserRecord;

#[derive(Debug)]
pub struct UserStore {
    users: RwLock<Arc<[UserRecord]>>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { users: RwLock::new(Arc::from(Vec::new())) }
    }

    /// Current snapshot of all users, in server order. Never fetches.
    #[must_use]
    pub fn all_users(&self) -> Arc<[UserRecord]> {
        Arc::clone(&self.users.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole list.
    pub(crate) fn set_users(&self, users: Vec<UserRecord>) {
        *self.users.write().unwrap_or_else(PoisonError::into_inner) = Arc::from(users);
    }

    /// Refresh the list from the API.
    ///
    /// On failure the error is logged and the previous list is kept.
    pub async fn fetch_users(&self, api: &dyn BlogApi) {
        match api.fetch_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "user list refreshed");
                self.set_users(users);
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching users");
            }
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
