// panier/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{KeyValueStore, StoreError};

/// Process-local store. Nothing survives the process; used by tests and by
/// sessions that do not need durability.
///
/// Lock guards are only held for the duration of a map operation, never
/// across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Raw stored value, for assertions.
  pub fn snapshot(&self, key: &str) -> Option<String> {
    self.entries.read().get(key).cloned()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.read().contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }

  /// Seeds a raw value, bypassing any container.
  pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.write().insert(key.into(), value.into());
  }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.snapshot(key))
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    self.entries.write().insert(key.to_string(), value);
    Ok(())
  }

  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.entries.write().remove(key);
    Ok(())
  }
}
