//! # Storage
//!
//! Persistence for the storefront: a raw string key-value backend behind the
//! [`KeyValueStore`] trait, and the typed, fail-soft [`StoreAdapter`] that every
//! other component talks to.
//!
//! Backends are interchangeable:
//!
//! - [`MemoryStore`] keeps records in process memory (default, tests)
//! - [`FileStore`] keeps one `<key>.json` file per record in a data directory

mod adapter;
mod file;
mod memory;

pub use adapter::*;
pub use file::*;
pub use memory::*;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors raised by a storage backend.
///
/// Reads never surface these to callers of [`StoreAdapter::read`]; writes do.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode record {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Raw key-value backend, the equivalent of a browser's per-origin storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw value for `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

type Result<T> = std::result::Result<T, StoreError>;

/// Named records kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Menu,
    OrderHistory,
    Coupons,
    Profile,
    LastOrderId,
}

impl StoreKey {
    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::Menu => "menu",
            StoreKey::OrderHistory => "history",
            StoreKey::Coupons => "coupons",
            StoreKey::Profile => "profile",
            StoreKey::LastOrderId => "last_order_id",
        }
    }

    /// Whether the physical key carries the namespace prefix. The last order
    /// id has always lived under its bare name.
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, StoreKey::LastOrderId)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
