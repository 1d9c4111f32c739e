//! The snapgraph social graph & content store.
//!
//! [`SocialStore`] owns users, posts, stories and notifications, runs every
//! mutation against them, and writes the affected keys to a [`KvStore`]
//! after each change. It is constructed once per session and passed by
//! reference to whatever needs it; there is no global instance.
//!
//! # Modules
//!
//! - [`error`]: StoreError, the result type of every store operation
//! - [`config`]: StoreConfig read from the environment
//! - [`seed`]: the default social graph installed into an empty store
//! - [`store`]: SocialStore, its read surface and session handling
//! - [`mutations`]: follow, post, like, comment, story and notification ops
//! - [`shared`]: SharedStore, an async handle with simulated latency

pub mod config;
pub mod error;
pub mod mutations;
mod notify;
pub mod seed;
pub mod shared;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use seed::SeedReport;
pub use shared::SharedStore;
pub use store::{RegisterProfile, SocialStore};

// Re-export the model and storage crates so callers need one dependency.
pub use snapgraph_core as core;
pub use snapgraph_storage as storage;
