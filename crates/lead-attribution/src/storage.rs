//! Session-scoped storage of captured attribution
//!
//! Mirrors browser session storage: string keys, string values, gone when the
//! session ends. Failures are logged and swallowed.

use crate::error::StorageError;
use crate::params::AttributionParams;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Key under which captured params are stored
pub const STORAGE_KEY: &str = "lead_utm_params";

/// String key/value store scoped to one browsing session
pub trait SessionStorage: Send + Sync {
    /// Read an item
    ///
    /// # Errors
    /// `StorageError` when storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write an item
    ///
    /// # Errors
    /// `StorageError` when storage refuses the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process session storage
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create empty storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store params for later page loads in this session
///
/// Failures are logged at `warn` and otherwise ignored.
pub fn store_params(storage: &dyn SessionStorage, params: &AttributionParams) {
    let encoded = match serde_json::to_string(params) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!("failed to encode attribution params: {}", e);
            return;
        }
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, &encoded) {
        tracing::warn!("failed to store attribution params: {}", e);
    }
}

/// Load params stored earlier in this session
///
/// Returns `None` when nothing was stored, storage is unreadable, or the
/// stored value does not decode.
#[must_use]
pub fn load_stored_params(storage: &dyn SessionStorage) -> Option<AttributionParams> {
    let stored = match storage.get_item(STORAGE_KEY) {
        Ok(stored) => stored?,
        Err(e) => {
            tracing::warn!("failed to read stored attribution params: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&stored) {
        Ok(params) => Some(params),
        Err(e) => {
            tracing::warn!("discarding malformed stored attribution params: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_load() {
        let storage = MemorySessionStorage::new();
        assert!(load_stored_params(&storage).is_none());

        let params = AttributionParams {
            utm_source: "newsletter".into(),
            ..AttributionParams::default()
        };
        store_params(&storage, &params);

        assert_eq!(storage.len(), 1);
        assert_eq!(load_stored_params(&storage), Some(params));
    }

    #[test]
    fn malformed_entry_is_discarded() {
        let storage = MemorySessionStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        assert!(load_stored_params(&storage).is_none());
    }
}
