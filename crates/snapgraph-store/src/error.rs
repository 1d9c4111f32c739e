//! Store error types.
//!
//! [`StoreError`] is the unified error for every store operation. Actions
//! that need a signed-in actor fail with [`StoreError::Unauthenticated`]
//! instead of being dropped, and owner-only actions fail with
//! [`StoreError::Forbidden`].

use snapgraph_core::{CoreError, PostId, UserId};
use snapgraph_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The operation needs a current session user and there is none.
    #[error("no user is signed in")]
    Unauthenticated,

    /// The actor does not own the content it tried to change.
    #[error("user {actor} may not {action} post {post}")]
    Forbidden {
        actor: UserId,
        action: &'static str,
        post: PostId,
    },

    /// Lookup or validation failure from the data model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The durable medium failed on an operation that reports it
    /// (open, load, flush).
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Whether this error is a failed lookup by id or username.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(e) if e.is_not_found())
    }

    /// Whether this error is a blank required field.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::EmptyField { .. }))
    }
}
