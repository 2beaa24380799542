// panier/src/store/mod.rs

//! The device-local key-value storage the containers persist into.
//!
//! Backends only need to move strings around; the JSON shape of what is stored
//! is owned by [`json`].

pub mod file;
pub(crate) mod json;
pub mod memory;

use anyhow::Error as AnyhowError;
use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("read of '{key}' failed: {source}")]
  Read {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("write of '{key}' failed: {source}")]
  Write {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("delete of '{key}' failed: {source}")]
  Delete {
    key: String,
    #[source]
    source: AnyhowError,
  },
}

impl StoreError {
  pub fn key(&self) -> &str {
    match self {
      StoreError::Read { key, .. } | StoreError::Write { key, .. } | StoreError::Delete { key, .. } => key,
    }
  }
}

/// Async string-to-string storage addressed by key.
///
/// Each call is expected to complete or fail as a whole. There is no
/// cross-call transaction: callers that read, modify and write back must not
/// interleave on the same key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
  /// Returns `Ok(None)` when the key has never been written or was deleted.
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

  /// Succeeds when the key does not exist.
  async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
