//! [`Post`] and its child [`Comment`]s.
//!
//! A post snapshots its author's username and avatar at creation time; they
//! are not re-joined when the profile changes. `timestamp` is immutable,
//! comments are append-only, and `tags` are always derived from the caption.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{CommentId, PostId, UserId};
use crate::likes::LikeSet;
use crate::text::extract_hashtags;
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub timestamp: u64,
    #[serde(flatten)]
    likes: LikeSet,
}

impl Comment {
    pub fn new(id: CommentId, author: &User, text: &str, timestamp: u64) -> Self {
        Comment {
            id,
            user_id: author.id.clone(),
            username: author.username.clone(),
            text: text.to_string(),
            timestamp,
            likes: LikeSet::new(),
        }
    }

    pub fn likes(&self) -> &LikeSet {
        &self.likes
    }

    /// Toggles `user`'s like. Returns `true` when the comment is now liked.
    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        self.likes.toggle(user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPost")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub username: String,
    pub user_avatar: String,
    pub image_url: String,
    caption: String,
    #[serde(flatten)]
    likes: LikeSet,
    timestamp: u64,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    tags: Vec<String>,
}

/// Stored layout of a [`Post`]. Any stored `tags` are ignored and
/// re-derived from the caption on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPost {
    id: PostId,
    user_id: UserId,
    username: String,
    user_avatar: String,
    image_url: String,
    caption: String,
    #[serde(flatten)]
    likes: LikeSet,
    timestamp: u64,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    location: Option<String>,
}

impl From<StoredPost> for Post {
    fn from(stored: StoredPost) -> Self {
        Post {
            tags: extract_hashtags(&stored.caption),
            id: stored.id,
            user_id: stored.user_id,
            username: stored.username,
            user_avatar: stored.user_avatar,
            image_url: stored.image_url,
            caption: stored.caption,
            likes: stored.likes,
            timestamp: stored.timestamp,
            comments: stored.comments,
            location: stored.location,
        }
    }
}

impl Post {
    /// Creates a post by `author`. Tags are extracted from `caption`; a
    /// blank location is stored as absent.
    pub fn new(
        id: PostId,
        author: &User,
        image_url: &str,
        caption: &str,
        location: Option<&str>,
        timestamp: u64,
    ) -> Self {
        Post {
            id,
            user_id: author.id.clone(),
            username: author.username.clone(),
            user_avatar: author.avatar.clone(),
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            likes: LikeSet::new(),
            timestamp,
            comments: Vec::new(),
            location: normalize_location(location),
            tags: extract_hashtags(caption),
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Replaces the caption and re-derives the tags.
    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
        self.tags = extract_hashtags(caption);
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn likes(&self) -> &LikeSet {
        &self.likes
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Toggles `user`'s like. Returns `true` when the post is now liked.
    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        self.likes.toggle(user)
    }

    /// Comments in the order they were added.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    pub fn comment_mut(&mut self, id: &CommentId) -> Result<&mut Comment, CoreError> {
        let post = self.id.clone();
        self.comments
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CoreError::CommentNotFound {
                post,
                comment: id.clone(),
            })
    }

    /// Appends a comment. Comments are never reordered or removed.
    pub fn push_comment(&mut self, comment: Comment) -> &Comment {
        self.comments.push(comment);
        &self.comments[self.comments.len() - 1]
    }

    /// Case-insensitive match against the caption or any tag. A leading `#`
    /// in `query` is ignored when matching tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let tag_query = query.strip_prefix('#').unwrap_or(&query);
        self.caption.to_lowercase().contains(&query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(tag_query))
    }
}

fn normalize_location(location: Option<&str>) -> Option<String> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// Fields an owner may change after publishing. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(default)]
    pub caption: Option<String>,
    /// `Some(None)` or `Some(Some(""))` clears the location.
    #[serde(default)]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PostPatch {
    pub fn caption(caption: &str) -> Self {
        PostPatch {
            caption: Some(caption.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.caption.is_none() && self.location.is_none() && self.image_url.is_none()
    }

    /// Merges the provided fields into `post`. Returns `false` when nothing
    /// was provided.
    pub fn apply(&self, post: &mut Post) -> bool {
        if let Some(caption) = &self.caption {
            post.set_caption(caption);
        }
        if let Some(location) = &self.location {
            post.location = normalize_location(location.as_deref());
        }
        if let Some(image_url) = &self.image_url {
            post.image_url = image_url.clone();
        }
        !self.is_empty()
    }
}
