//! [`StateSnapshot`]: the full persisted state and its per-key codec.
//!
//! Each field maps to one [`StateKey`]. Values are JSON. An absent key
//! decodes to the field's documented default (empty collection, no current
//! user, light theme); a present value that fails to decode is an error
//! rather than a silent reset.

use serde::de::DeserializeOwned;
use serde::Serialize;

use snapgraph_core::{Notification, Story, Timeline, UserDirectory, UserId};

use crate::error::StorageError;
use crate::keys::StateKey;
use crate::traits::KvStore;

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub users: UserDirectory,
    pub posts: Timeline,
    pub stories: Vec<Story>,
    pub notifications: Vec<Notification>,
    /// Reference into `users`; `None` when signed out.
    pub current_user: Option<UserId>,
    pub dark_mode: bool,
}

impl StateSnapshot {
    /// Reads every key from `kv`, substituting defaults for absent keys.
    pub fn load<S: KvStore + ?Sized>(kv: &S) -> Result<Self, StorageError> {
        Ok(StateSnapshot {
            users: read_value(kv, StateKey::Users)?,
            posts: read_value(kv, StateKey::Posts)?,
            stories: read_value(kv, StateKey::Stories)?,
            notifications: read_value(kv, StateKey::Notifications)?,
            current_user: read_value(kv, StateKey::CurrentUser)?,
            dark_mode: read_value(kv, StateKey::DarkMode)?,
        })
    }

    /// Writes every key. Stops at the first failing write.
    pub fn save<S: KvStore + ?Sized>(&self, kv: &mut S) -> Result<(), StorageError> {
        for key in StateKey::ALL {
            self.save_key(kv, key)?;
        }
        Ok(())
    }

    /// Writes the single field behind `key`.
    pub fn save_key<S: KvStore + ?Sized>(
        &self,
        kv: &mut S,
        key: StateKey,
    ) -> Result<(), StorageError> {
        match key {
            StateKey::Users => write_value(kv, key, &self.users),
            StateKey::Posts => write_value(kv, key, &self.posts),
            StateKey::Stories => write_value(kv, key, &self.stories),
            StateKey::Notifications => write_value(kv, key, &self.notifications),
            StateKey::CurrentUser => write_value(kv, key, &self.current_user),
            StateKey::DarkMode => write_value(kv, key, &self.dark_mode),
        }
    }
}

/// Decodes the value under `key`, or `T::default()` when the key is absent.
pub fn read_value<T, S>(kv: &S, key: StateKey) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    match kv.get(key.as_str())? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
            key: key.as_str().to_string(),
            source,
        }),
        None => Ok(T::default()),
    }
}

/// Encodes `value` and stores it under `key`.
pub fn write_value<T, S>(kv: &mut S, key: StateKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.as_str().to_string(),
        source,
    })?;
    kv.set(key.as_str(), &raw)
}
