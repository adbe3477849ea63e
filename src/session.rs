//! Explicit session context.
//!
//! DESIGN
//! ======
//! Page scripts used to reach into `localStorage` directly. Here every
//! operation receives a [`Session`] that pairs a [`TokenStore`] with the
//! [`SessionConfig`] naming the storage key, so the same code runs against
//! browser storage or an in-memory store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::SessionConfig;
use crate::token::{Claims, DecodeError, decode_claims, is_token_expired};

/// Key/value storage for the bearer token.
///
/// Writes are best-effort: implementations log and drop storage failures.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store, used outside the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.insert(key, value);
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Token store plus configuration. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
    config: Rc<SessionConfig>,
}

impl Session {
    #[must_use]
    pub fn new(store: Rc<dyn TokenStore>, config: SessionConfig) -> Self {
        Self { store, config: Rc::new(config) }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Stored token, with an empty string treated as absent.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.config.storage_key)
            .filter(|token| !token.is_empty())
    }

    pub fn store_token(&self, token: &str) {
        self.store.set(&self.config.storage_key, token);
    }

    pub fn clear(&self) {
        self.store.remove(&self.config.storage_key);
    }

    /// Decode the stored token's claims.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MissingToken`] when nothing is stored, otherwise any
    /// error from [`decode_claims`].
    pub fn claims(&self) -> Result<Claims, DecodeError> {
        let token = self.token().ok_or(DecodeError::MissingToken)?;
        decode_claims(&token)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        is_token_expired(self.token().as_deref())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("storage_key", &self.config.storage_key)
            .field("has_token", &self.token().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
