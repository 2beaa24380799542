// panier/src/store/file.rs

//! Directory-backed store: one file per key.

use anyhow::Context;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

use super::{KeyValueStore, StoreError};

const VALUE_EXT: &str = "json";
const TEMP_EXT: &str = "json.tmp";

/// Stores each key as `<root>/<escaped key>.json`.
///
/// A `set` writes a sibling temp file and renames it over the target, so a
/// reader sees either the old value or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  /// Opens (and creates if needed) the storage directory.
  pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
    let root = root.into();
    tokio::fs::create_dir_all(&root).await?;
    event!(Level::DEBUG, root = %root.display(), "FileStore opened.");
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, key: &str, ext: &str) -> PathBuf {
    self.root.join(format!("{}.{}", escape_key(key), ext))
  }
}

/// Keeps `[A-Za-z0-9_-]` as is and writes every other byte as `%XX`, so no key
/// can escape the root directory or collide with another key.
fn escape_key(key: &str) -> String {
  let mut out = String::with_capacity(key.len());
  for b in key.bytes() {
    if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
      out.push(b as char);
    } else {
      out.push_str(&format!("%{:02X}", b));
    }
  }
  out
}

#[async_trait]
impl KeyValueStore for FileStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let path = self.path_for(key, VALUE_EXT);
    match tokio::fs::read_to_string(&path).await {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(StoreError::Read {
        key: key.to_string(),
        source: anyhow::Error::new(e).context(format!("reading {}", path.display())),
      }),
    }
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    let target = self.path_for(key, VALUE_EXT);
    let temp = self.path_for(key, TEMP_EXT);

    let result: anyhow::Result<()> = async {
      tokio::fs::write(&temp, value.as_bytes())
        .await
        .with_context(|| format!("writing {}", temp.display()))?;
      tokio::fs::rename(&temp, &target)
        .await
        .with_context(|| format!("renaming {} to {}", temp.display(), target.display()))?;
      Ok(())
    }
    .await;

    result.map_err(|source| {
      event!(Level::ERROR, key, error = %source, "FileStore write failed.");
      StoreError::Write {
        key: key.to_string(),
        source,
      }
    })
  }

  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    let path = self.path_for(key, VALUE_EXT);
    match tokio::fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(StoreError::Delete {
        key: key.to_string(),
        source: anyhow::Error::new(e).context(format!("removing {}", path.display())),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::escape_key;

  #[test]
  fn escaping_keeps_plain_keys_readable() {
    assert_eq!(escape_key("cart_42"), "cart_42");
    assert_eq!(escape_key("favorites_guest"), "favorites_guest");
  }

  #[test]
  fn escaping_neutralises_path_characters() {
    assert_eq!(escape_key("../etc"), "%2E%2E%2Fetc");
    assert_eq!(escape_key("a b"), "a%20b");
    assert_ne!(escape_key("a.b"), escape_key("a%2Eb"));
  }
}
