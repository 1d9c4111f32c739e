//! Timeline: the post collection, most recent first.
//!
//! Ordering is a property of the collection, not a view sort: new posts are
//! prepended and nothing reorders existing posts. Like counts and comment
//! order are guarded by [`Post`] itself; the timeline adds id lookup and
//! the read queries views filter on.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{PostId, UserId};
use crate::post::Post;
use crate::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    posts: Vec<Post>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps posts already in most-recent-first order.
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Timeline { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &PostId) -> Result<&mut Post, CoreError> {
        self.posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CoreError::PostNotFound { id: id.clone() })
    }

    /// Inserts `post` at the front.
    pub fn prepend(&mut self, post: Post) -> &Post {
        self.posts.insert(0, post);
        &self.posts[0]
    }

    /// Removes the post with `id`, if present.
    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        let idx = self.posts.iter().position(|p| &p.id == id)?;
        Some(self.posts.remove(idx))
    }

    /// Posts by `viewer` or by anyone `viewer` follows, in timeline order.
    pub fn feed_for(&self, viewer: &User) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.user_id == viewer.id || viewer.follows(&p.user_id))
            .collect()
    }

    pub fn by_author(&self, author: &UserId) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.is_authored_by(author))
            .collect()
    }

    /// Posts carrying `tag`, compared case-insensitively. A leading `#` is
    /// ignored.
    pub fn tagged(&self, tag: &str) -> Vec<&Post> {
        let tag = tag.strip_prefix('#').unwrap_or(tag).to_lowercase();
        self.posts
            .iter()
            .filter(|p| p.tags().iter().any(|t| t.to_lowercase() == tag))
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.matches(query)).collect()
    }
}
