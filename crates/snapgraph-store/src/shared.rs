//! Async handle over a [`SocialStore`].
//!
//! [`SharedStore`] wraps the store in `Arc<tokio::sync::Mutex<>>` so async
//! tasks can share one session. The lock is async-aware so waiting tasks
//! do not block the runtime.
//!
//! Login, sign-up and publishing wait a configurable latency before they
//! run, standing in for a network round trip. The wait happens before the
//! lock is taken: dropping the future during the wait cancels the
//! operation and leaves the store untouched. There is no retry or timeout.

use std::sync::Arc;
use std::time::Duration;

use snapgraph_core::{Post, User};
use snapgraph_storage::KvStore;

use crate::error::StoreError;
use crate::store::{RegisterProfile, SocialStore};

pub struct SharedStore<S: KvStore> {
    inner: Arc<tokio::sync::Mutex<SocialStore<S>>>,
    latency: Duration,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S: KvStore> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        SharedStore {
            inner: Arc::clone(&self.inner),
            latency: self.latency,
        }
    }
}

impl<S: KvStore> SharedStore<S> {
    pub fn new(store: SocialStore<S>, latency: Duration) -> Self {
        SharedStore {
            inner: Arc::new(tokio::sync::Mutex::new(store)),
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Signs in as `username` after the simulated latency.
    pub async fn login(&self, username: &str) -> Result<User, StoreError> {
        self.delay().await;
        self.inner.lock().await.authenticate(username)
    }

    /// Registers a new account after the simulated latency.
    pub async fn signup(&self, profile: RegisterProfile) -> Result<User, StoreError> {
        self.delay().await;
        self.inner.lock().await.register(profile)
    }

    /// Publishes a post after the simulated latency.
    pub async fn publish_post(
        &self,
        image: &str,
        caption: &str,
        location: Option<&str>,
    ) -> Result<Post, StoreError> {
        self.delay().await;
        self.inner
            .lock()
            .await
            .create_post(image, caption, location)
    }

    /// Runs `f` against the store under the lock, with no added latency.
    pub async fn with<R>(&self, f: impl FnOnce(&mut SocialStore<S>) -> R) -> R {
        let mut store = self.inner.lock().await;
        f(&mut store)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tracing::debug!(latency_ms = self.latency.as_millis() as u64, "simulating latency");
            tokio::time::sleep(self.latency).await;
        }
    }
}
