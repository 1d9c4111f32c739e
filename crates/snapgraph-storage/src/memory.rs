//! In-memory implementation of [`KvStore`].
//!
//! [`InMemoryKv`] is a first-class backend for tests, ephemeral sessions,
//! and anywhere persistence across processes isn't needed. It has identical
//! semantics to the SQLite backend. Cloning it yields an independent copy,
//! which tests use to "restart" a store from the same medium.

use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::traits::KvStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryKv {
    entries: BTreeMap<String, String>,
}

impl InMemoryKv {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
