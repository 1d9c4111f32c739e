//! Durable key-value persistence for the snapgraph store.
//!
//! Provides the [`KvStore`] trait defining the storage contract that all
//! backends implement, plus [`InMemoryKv`] and [`SqliteKv`] as first-class
//! backends.
//!
//! # Layout
//!
//! Each top-level collection and each scalar of the store lives under its
//! own stable key (see [`StateKey`]) as a JSON snapshot of its in-memory
//! counterpart. Keys are written independently, so one failing write never
//! corrupts another key.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`keys`]: StateKey, the stable key names
//! - [`traits`]: KvStore trait definition
//! - [`memory`]: InMemoryKv implementation
//! - [`schema`]: SQL schema and migration setup
//! - [`sqlite`]: SqliteKv implementation
//! - [`snapshot`]: StateSnapshot load/save codec

pub mod error;
pub mod keys;
pub mod memory;
pub mod schema;
pub mod snapshot;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use keys::StateKey;
pub use memory::InMemoryKv;
pub use snapshot::StateSnapshot;
pub use sqlite::SqliteKv;
pub use traits::KvStore;
