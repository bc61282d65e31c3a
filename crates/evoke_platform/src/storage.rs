//! Persistent key-value store abstraction (`localStorage` in a browser)

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;

use crate::error::{PlatformError, Result};

/// Synchronous string key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently in the store
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory store with optional quota and access-denied simulation
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<IndexMap<String, String>>,
    /// Maximum total bytes of keys plus values
    quota: Cell<Option<usize>>,
    denied: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total stored bytes; writes that would exceed it fail
    pub fn with_quota(self, bytes: usize) -> Self {
        self.quota.set(Some(bytes));
        self
    }

    /// Deny every operation, the way private browsing modes often do
    pub fn set_denied(&self, denied: bool) {
        self.denied.set(denied);
    }

    /// Raw value at `key`, bypassing denial (test inspection)
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_access(&self) -> Result<()> {
        if self.denied.get() {
            Err(PlatformError::Unavailable(
                "storage access denied".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_access()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_access()?;
        if let Some(quota) = self.quota.get() {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(PlatformError::QuotaExceeded(format!(
                    "writing `{key}` needs {needed} bytes, quota is {quota}"
                )));
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_access()?;
        self.entries.borrow_mut().shift_remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.check_access()?;
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
