//! [`User`]: a profile plus its half of the follow graph.
//!
//! `followers` and `following` are ordered sets. They are read-only outside
//! this crate: every change goes through [`UserDirectory`](crate::UserDirectory)
//! so both sides of a relationship move together.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Avatar service used for synthesized profiles.
pub const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Default avatar for a username.
pub fn default_avatar(seed: &str) -> String {
    format!("{AVATAR_BASE_URL}{seed}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    followers: IndexSet<UserId>,
    #[serde(default)]
    following: IndexSet<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl User {
    /// Creates a user with no relationships, the default avatar and an
    /// empty bio.
    pub fn new(id: UserId, username: &str, display_name: &str) -> Self {
        User {
            id,
            username: username.to_string(),
            display_name: display_name.to_string(),
            avatar: default_avatar(username),
            bio: String::new(),
            website: None,
            followers: IndexSet::new(),
            following: IndexSet::new(),
            is_verified: None,
        }
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = avatar.to_string();
        self
    }

    pub fn with_bio(mut self, bio: &str) -> Self {
        self.bio = bio.to_string();
        self
    }

    pub fn with_website(mut self, website: &str) -> Self {
        self.website = Some(website.to_string());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.is_verified = Some(verified);
        self
    }

    /// Ids of users following this user, in follow order.
    pub fn followers(&self) -> &IndexSet<UserId> {
        &self.followers
    }

    /// Ids of users this user follows, in follow order.
    pub fn following(&self) -> &IndexSet<UserId> {
        &self.following
    }

    pub fn follows(&self, other: &UserId) -> bool {
        self.following.contains(other)
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }

    pub(crate) fn followers_mut(&mut self) -> &mut IndexSet<UserId> {
        &mut self.followers
    }

    pub(crate) fn following_mut(&mut self) -> &mut IndexSet<UserId> {
        &mut self.following
    }
}
