//! Core error types for snapgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! lookup and validation failures of the data model. None of these are
//! fatal: callers degrade to a no-op or an inline message.

use thiserror::Error;

use crate::id::{CommentId, NotificationId, PostId, StoryId, UserId};

/// Core errors produced by the snapgraph-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No user with this id.
    #[error("user not found: {id}")]
    UserNotFound { id: UserId },

    /// No user with this username.
    #[error("no user named '{username}'")]
    UsernameNotFound { username: String },

    /// No post with this id.
    #[error("post not found: {id}")]
    PostNotFound { id: PostId },

    /// No comment with this id on the given post.
    #[error("comment not found: post={post}, comment={comment}")]
    CommentNotFound { post: PostId, comment: CommentId },

    #[error("story not found: {id}")]
    StoryNotFound { id: StoryId },

    #[error("notification not found: {id}")]
    NotificationNotFound { id: NotificationId },

    /// Attempting to register a username that already exists.
    #[error("username already taken: '{username}'")]
    UsernameTaken { username: String },

    /// A required text field was blank after trimming.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// The follow graph is not bidirectionally consistent.
    #[error("graph inconsistency: {reason}")]
    GraphInconsistency { reason: String },
}

impl CoreError {
    /// Whether this error is a failed lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::UserNotFound { .. }
                | CoreError::UsernameNotFound { .. }
                | CoreError::PostNotFound { .. }
                | CoreError::CommentNotFound { .. }
                | CoreError::StoryNotFound { .. }
                | CoreError::NotificationNotFound { .. }
        )
    }
}
