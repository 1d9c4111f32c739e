//! [`LikeSet`]: the set of users who liked a post or comment.
//!
//! The set is the source of truth. The `likes` count that appears in the
//! stored layout is computed from it on every serialization and ignored on
//! deserialization, so a snapshot whose count drifted from its `likedBy`
//! list is repaired on load.
//!
//! Likers are kept sorted by id. Toggling the same user twice is then an
//! exact inverse, including the stored `likedBy` order.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Sorted set of likers with a derived count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LikeSetRepr", into = "LikeSetRepr")]
pub struct LikeSet {
    liked_by: IndexSet<UserId>,
}

/// Stored layout: `{ "likes": n, "likedBy": [...] }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeSetRepr {
    #[serde(default)]
    likes: usize,
    #[serde(default)]
    liked_by: IndexSet<UserId>,
}

impl From<LikeSetRepr> for LikeSet {
    fn from(repr: LikeSetRepr) -> Self {
        let mut liked_by = repr.liked_by;
        liked_by.sort();
        LikeSet { liked_by }
    }
}

impl From<LikeSet> for LikeSetRepr {
    fn from(set: LikeSet) -> Self {
        LikeSetRepr {
            likes: set.liked_by.len(),
            liked_by: set.liked_by,
        }
    }
}

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of likes. Always equal to the number of likers.
    pub fn count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    /// Likers, sorted by id.
    pub fn liked_by(&self) -> impl Iterator<Item = &UserId> {
        self.liked_by.iter()
    }

    /// Adds `user` if absent, removes it otherwise. Returns `true` when the
    /// user likes the target after the call.
    pub fn toggle(&mut self, user: &UserId) -> bool {
        if self.liked_by.shift_remove(user) {
            false
        } else {
            self.liked_by.insert_sorted(user.clone());
            true
        }
    }
}

impl FromIterator<UserId> for LikeSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        let mut liked_by: IndexSet<UserId> = iter.into_iter().collect();
        liked_by.sort();
        LikeSet { liked_by }
    }
}
