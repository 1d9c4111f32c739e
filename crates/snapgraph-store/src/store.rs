//! SocialStore: the state container and its read surface.
//!
//! The store holds one [`StateSnapshot`] in memory and a [`KvStore`] it
//! mirrors the snapshot into. The in-memory copy is authoritative: after a
//! mutation the touched keys are written best-effort, and a failed write is
//! logged rather than rolled back. [`SocialStore::flush`] writes everything
//! and reports failures.
//!
//! Mutations live in [`crate::mutations`]; this module covers construction,
//! persistence, the session and the read-only views.

use snapgraph_core::time::now_millis;
use snapgraph_core::{
    CoreError, Notification, Post, PostId, Story, Timeline, User, UserDirectory, UserId,
};
use snapgraph_storage::{KvStore, StateKey, StateSnapshot};

use crate::error::StoreError;
use crate::seed::{seed_if_empty, SeedReport};

/// Bio given to accounts created through [`SocialStore::register`] without
/// one.
pub const DEFAULT_BIO: &str = "New to snapgraph";

/// Sign-up form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterProfile {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub website: Option<String>,
}

impl RegisterProfile {
    pub fn new(username: &str, display_name: &str) -> Self {
        RegisterProfile {
            username: username.to_string(),
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }
}

/// The social graph & content store.
pub struct SocialStore<S: KvStore> {
    pub(crate) kv: S,
    pub(crate) state: StateSnapshot,
}

impl<S: KvStore> SocialStore<S> {
    // -----------------------------------------------------------------------
    // Construction & persistence
    // -----------------------------------------------------------------------

    /// Loads state from `kv` without seeding. Absent keys load as their
    /// defaults.
    pub fn load(kv: S) -> Result<Self, StoreError> {
        let state = StateSnapshot::load(&kv)?;
        if let Err(err) = state.users.check_consistency() {
            tracing::warn!(error = %err, "loaded follow graph is inconsistent");
        }
        tracing::debug!(
            users = state.users.len(),
            posts = state.posts.len(),
            stories = state.stories.len(),
            notifications = state.notifications.len(),
            "store loaded"
        );
        Ok(SocialStore { kv, state })
    }

    /// Loads state from `kv` and seeds every empty collection.
    pub fn open(kv: S) -> Result<Self, StoreError> {
        let mut store = Self::load(kv)?;
        store.seed()?;
        Ok(store)
    }

    /// Seeds empty collections and persists what changed.
    pub fn seed(&mut self) -> Result<SeedReport, StoreError> {
        let report = seed_if_empty(&mut self.state, now_millis())?;
        if !report.is_empty() {
            tracing::info!(
                users = report.users,
                posts = report.posts,
                stories = report.stories,
                "seeded default content"
            );
            self.persist(&report.touched_keys());
        }
        Ok(report)
    }

    /// Writes every key to the medium, failing on the first error.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.state.save(&mut self.kv)?;
        Ok(())
    }

    /// Best-effort write of `keys`. Failures are logged; the in-memory state
    /// stays authoritative for the session.
    pub(crate) fn persist(&mut self, keys: &[StateKey]) {
        for &key in keys {
            if let Err(err) = self.state.save_key(&mut self.kv, key) {
                tracing::warn!(key = %key, error = %err, "failed to persist store state");
            }
        }
    }

    /// The backing medium.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Consumes the store, returning the backing medium.
    pub fn into_kv(self) -> S {
        self.kv
    }

    /// The full in-memory state.
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.state
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// The signed-in user, resolved against the user collection.
    pub fn current_user(&self) -> Option<&User> {
        self.state
            .current_user
            .as_ref()
            .and_then(|id| self.state.users.get(id))
    }

    /// The signed-in user, or `Unauthenticated`. Returns an owned copy so
    /// callers can go on to mutate the store.
    pub(crate) fn actor(&self) -> Result<User, StoreError> {
        self.current_user()
            .cloned()
            .ok_or(StoreError::Unauthenticated)
    }

    /// Signs in as `username`. There is no password check.
    pub fn authenticate(&mut self, username: &str) -> Result<User, StoreError> {
        let user = self
            .state
            .users
            .by_username(username)
            .cloned()
            .ok_or_else(|| CoreError::UsernameNotFound {
                username: username.to_string(),
            })?;
        self.state.current_user = Some(user.id.clone());
        self.persist(&[StateKey::CurrentUser]);
        tracing::info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Creates an account and signs in as it.
    pub fn register(&mut self, profile: RegisterProfile) -> Result<User, StoreError> {
        let username = profile.username.trim();
        let display_name = profile.display_name.trim();
        if username.is_empty() {
            return Err(CoreError::EmptyField { field: "username" }.into());
        }
        if display_name.is_empty() {
            return Err(CoreError::EmptyField {
                field: "display name",
            }
            .into());
        }

        let bio = profile
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BIO);
        let mut user = User::new(UserId::generate(), username, display_name)
            .with_bio(bio)
            .verified(false);
        if let Some(website) = profile.website.as_deref().map(str::trim) {
            if !website.is_empty() {
                user = user.with_website(website);
            }
        }

        let user = self.state.users.insert(user)?.clone();
        self.state.current_user = Some(user.id.clone());
        self.persist(&[StateKey::Users, StateKey::CurrentUser]);
        tracing::info!(user = %user.id, username = %user.username, "registered");
        Ok(user)
    }

    /// Ends the session.
    pub fn sign_out(&mut self) {
        if self.state.current_user.take().is_some() {
            self.persist(&[StateKey::CurrentUser]);
            tracing::info!("signed out");
        }
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        self.state.users.users()
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.state.users
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.state.users.get(id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.state.users.by_username(username)
    }

    /// All posts, most recent first.
    pub fn posts(&self) -> &[Post] {
        self.state.posts.posts()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.state.posts
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.state.posts.get(id)
    }

    pub fn stories(&self) -> &[Story] {
        &self.state.stories
    }

    /// Every notification, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    /// Notifications addressed to the signed-in user.
    pub fn notifications_for_current(&self) -> Vec<&Notification> {
        let Some(me) = self.state.current_user.as_ref() else {
            return Vec::new();
        };
        self.state
            .notifications
            .iter()
            .filter(|n| &n.recipient_id == me)
            .collect()
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications_for_current()
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    /// Posts by the signed-in user or anyone it follows. Empty when signed
    /// out.
    pub fn feed(&self) -> Vec<&Post> {
        match self.current_user() {
            Some(me) => self.state.posts.feed_for(me),
            None => Vec::new(),
        }
    }

    pub fn is_following(&self, target: &UserId) -> bool {
        self.state
            .current_user
            .as_ref()
            .is_some_and(|me| self.state.users.is_following(me, target))
    }

    pub fn search_users(&self, query: &str) -> Vec<&User> {
        self.state.users.search(query)
    }

    pub fn search_posts(&self, query: &str) -> Vec<&Post> {
        self.state.posts.search(query)
    }

    /// Accounts the signed-in user might follow. Empty when signed out.
    pub fn suggested_users(&self) -> Vec<&User> {
        match self.state.current_user.as_ref() {
            Some(me) => self.state.users.suggestions_for(me),
            None => Vec::new(),
        }
    }

    pub fn posts_by(&self, author: &UserId) -> Vec<&Post> {
        self.state.posts.by_author(author)
    }

    pub fn posts_tagged(&self, tag: &str) -> Vec<&Post> {
        self.state.posts.tagged(tag)
    }
}
