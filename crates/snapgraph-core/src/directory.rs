//! UserDirectory: the user collection and the follow graph it carries.
//!
//! [`UserDirectory`] is the only way to change a user's `followers` or
//! `following` sets. It enforces the bidirectional invariant
//!
//! ```text
//! a.id ∈ b.followers  ⇔  b.id ∈ a.following
//! ```
//!
//! by resolving both endpoints before touching either side, so a failed
//! lookup leaves the graph untouched and a successful call updates both.
//! Because the sets are ordered sets, following twice is a no-op rather
//! than a duplicate entry.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::UserId;
use crate::user::User;

/// Users in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-loaded user list. The follow graph is taken as
    /// stored; use [`check_consistency`](Self::check_consistency) to audit it.
    pub fn from_users(users: Vec<User>) -> Self {
        UserDirectory { users }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.get(id).is_some()
    }

    /// Exact, case-sensitive username lookup.
    pub fn by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Whether `actor` currently follows `target`.
    pub fn is_following(&self, actor: &UserId, target: &UserId) -> bool {
        self.get(actor).is_some_and(|u| u.follows(target))
    }

    /// Case-insensitive substring search over username and display name.
    pub fn search(&self, query: &str) -> Vec<&User> {
        let query = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&query)
                    || u.display_name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Users other than `viewer` that `viewer` does not follow.
    pub fn suggestions_for(&self, viewer: &UserId) -> Vec<&User> {
        let Some(me) = self.get(viewer) else {
            return Vec::new();
        };
        self.users
            .iter()
            .filter(|u| &u.id != viewer && !me.follows(&u.id))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Appends a user. Ids and usernames must be unique.
    ///
    /// Relationship sets on the incoming user are discarded; relationships
    /// are only created through [`follow`](Self::follow).
    pub fn insert(&mut self, mut user: User) -> Result<&User, CoreError> {
        if self.by_username(&user.username).is_some() {
            return Err(CoreError::UsernameTaken {
                username: user.username,
            });
        }
        if self.contains(&user.id) {
            return Err(CoreError::GraphInconsistency {
                reason: format!("duplicate user id {}", user.id),
            });
        }
        user.followers_mut().clear();
        user.following_mut().clear();
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Makes `actor` follow `target`.
    ///
    /// Returns `Ok(true)` when the relationship was created, `Ok(false)` for
    /// a self-follow or an existing relationship.
    pub fn follow(&mut self, actor: &UserId, target: &UserId) -> Result<bool, CoreError> {
        if actor == target {
            return Ok(false);
        }
        let (a, t) = self.resolve_pair(actor, target)?;
        let added_following = self.users[a].following_mut().insert(target.clone());
        let added_follower = self.users[t].followers_mut().insert(actor.clone());
        Ok(added_following || added_follower)
    }

    /// Removes the `actor` → `target` relationship.
    ///
    /// Returns `Ok(true)` when something was removed.
    pub fn unfollow(&mut self, actor: &UserId, target: &UserId) -> Result<bool, CoreError> {
        if actor == target {
            return Ok(false);
        }
        let (a, t) = self.resolve_pair(actor, target)?;
        let removed_following = self.users[a].following_mut().shift_remove(target);
        let removed_follower = self.users[t].followers_mut().shift_remove(actor);
        Ok(removed_following || removed_follower)
    }

    /// Resolves both endpoints to indices before any mutation happens.
    fn resolve_pair(&self, actor: &UserId, target: &UserId) -> Result<(usize, usize), CoreError> {
        let a = self.index_of(actor)?;
        let t = self.index_of(target)?;
        Ok((a, t))
    }

    fn index_of(&self, id: &UserId) -> Result<usize, CoreError> {
        self.users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })
    }

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------

    /// Verifies the bidirectional follow invariant and that every referenced
    /// id exists.
    pub fn check_consistency(&self) -> Result<(), CoreError> {
        for user in &self.users {
            for target in user.following() {
                let other = self.get(target).ok_or_else(|| CoreError::GraphInconsistency {
                    reason: format!("{} follows unknown user {}", user.id, target),
                })?;
                if !other.followers().contains(&user.id) {
                    return Err(CoreError::GraphInconsistency {
                        reason: format!(
                            "{} follows {} but is missing from its followers",
                            user.id, target
                        ),
                    });
                }
            }
            for follower in user.followers() {
                let other = self.get(follower).ok_or_else(|| CoreError::GraphInconsistency {
                    reason: format!("{} is followed by unknown user {}", user.id, follower),
                })?;
                if !other.following().contains(&user.id) {
                    return Err(CoreError::GraphInconsistency {
                        reason: format!(
                            "{} lists follower {} which does not follow it",
                            user.id, follower
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
