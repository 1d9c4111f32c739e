//! The [`KvStore`] trait defining the durable key-value medium.
//!
//! All backends (InMemoryKv, SqliteKv, etc.) implement this trait, so the
//! store can swap them without changing its logic. Values are opaque
//! strings at this layer; encoding lives in [`snapshot`](crate::snapshot).

use crate::error::StorageError;

/// The storage contract for persisted store state.
///
/// The trait is synchronous: the store has a single writer and every write
/// completes before the mutation that caused it returns.
pub trait KvStore {
    /// Returns the value under `key`, or `None` if the key was never set or
    /// was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Inserts or overwrites the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}
