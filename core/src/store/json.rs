// panier/src/store/json.rs

//! Load/save of JSON arrays, shared by the cart and favorites containers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{event, Level};

use super::KeyValueStore;
use crate::error::{PanierError, PanierResult};

/// Reads the array stored at `key`.
///
/// Never fails: an absent key, a read error, or a document that is not a JSON
/// array all give an empty list. Entries that do not decode as `T` are dropped
/// one by one so a single bad record does not empty the whole list.
pub(crate) async fn load_list<S, T>(store: &S, key: &str) -> Vec<T>
where
  S: KeyValueStore + ?Sized,
  T: DeserializeOwned,
{
  let raw = match store.get(key).await {
    Ok(Some(raw)) => raw,
    Ok(None) => {
      event!(Level::DEBUG, key, "Nothing stored yet, starting empty.");
      return Vec::new();
    }
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Storage read failed, starting empty.");
      return Vec::new();
    }
  };

  let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
    Ok(entries) => entries,
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Stored value is not a JSON array, starting empty.");
      return Vec::new();
    }
  };

  let mut out = Vec::with_capacity(entries.len());
  for (index, entry) in entries.into_iter().enumerate() {
    match serde_json::from_value::<T>(entry) {
      Ok(item) => out.push(item),
      Err(e) => event!(Level::WARN, key, index, error = %e, "Skipping unreadable stored entry."),
    }
  }
  out
}

pub(crate) async fn save_list<S, T>(store: &S, key: &str, items: &[T]) -> PanierResult<()>
where
  S: KeyValueStore + ?Sized,
  T: Serialize,
{
  let body = serde_json::to_string(items).map_err(|source| PanierError::Serialization {
    key: key.to_string(),
    source,
  })?;
  store.set(key, body).await.map_err(|source| PanierError::StorageWrite {
    key: key.to_string(),
    source,
  })
}

pub(crate) async fn delete_list<S>(store: &S, key: &str) -> PanierResult<()>
where
  S: KeyValueStore + ?Sized,
{
  store.delete(key).await.map_err(|source| PanierError::StorageDelete {
    key: key.to_string(),
    source,
  })
}
