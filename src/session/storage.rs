//! Key-value storage backends for the session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::SessionError;

/// Durable string slots keyed by name.
///
/// Backends report their own failures; the session store does not catch
/// them.
pub trait SessionStorage: Send + Sync {
    /// Reads a slot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Removes a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        (**self).remove(key)
    }
}

/// In-memory backend used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the slot map lock is poisoned.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    /// Returns true when no slot is occupied.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the slot map lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, SessionError> {
        self.slots.lock().map_err(|error| SessionError::Storage {
            message: format!("session slots lock poisoned: {error}"),
        })
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
