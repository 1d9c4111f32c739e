//! Store configuration.
//!
//! Reads configuration from environment variables:
//! - `SNAPGRAPH_DB_PATH`: SQLite database file path (default: "snapgraph.db")
//! - `SNAPGRAPH_LATENCY_MS`: simulated latency for login, signup and
//!   publishing (default: 1000)
//! - `SNAPGRAPH_SEED`: seed empty collections on open (default: true)

use std::time::Duration;

use snapgraph_storage::SqliteKv;

use crate::error::StoreError;
use crate::store::SocialStore;

pub const DEFAULT_DB_PATH: &str = "snapgraph.db";
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: String,
    pub latency: Duration,
    pub seed_on_empty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            db_path: DEFAULT_DB_PATH.to_string(),
            latency: DEFAULT_LATENCY,
            seed_on_empty: true,
        }
    }
}

impl StoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unparseable
    /// values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StoreConfig::default();

        let db_path = lookup("SNAPGRAPH_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.db_path);

        let latency = match lookup("SNAPGRAPH_LATENCY_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid SNAPGRAPH_LATENCY_MS, using default");
                    defaults.latency
                }
            },
            None => defaults.latency,
        };

        let seed_on_empty = match lookup("SNAPGRAPH_SEED") {
            Some(raw) => match parse_flag(&raw) {
                Some(flag) => flag,
                None => {
                    tracing::warn!(value = %raw, "invalid SNAPGRAPH_SEED, using default");
                    defaults.seed_on_empty
                }
            },
            None => defaults.seed_on_empty,
        };

        StoreConfig {
            db_path,
            latency,
            seed_on_empty,
        }
    }

    /// Opens a SQLite-backed store at `db_path`, seeding it if configured.
    pub fn open_sqlite(&self) -> Result<SocialStore<SqliteKv>, StoreError> {
        let kv = SqliteKv::new(&self.db_path)?;
        if self.seed_on_empty {
            SocialStore::open(kv)
        } else {
            SocialStore::load(kv)
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
