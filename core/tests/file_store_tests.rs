// tests/file_store_tests.rs
mod common;

use common::*;
use panier::{CartContainer, FileStore, Identity, KeyValueStore, OwnerKey};
use std::sync::Arc;

#[tokio::test]
async fn test_get_set_delete() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let store = FileStore::open(dir.path().join("kv")).await.unwrap();

  assert_eq!(store.get("cart_1").await.unwrap(), None);
  store.set("cart_1", "[]".to_string()).await.unwrap();
  assert_eq!(store.get("cart_1").await.unwrap().as_deref(), Some("[]"));

  store.set("cart_1", "[1]".to_string()).await.unwrap();
  assert_eq!(store.get("cart_1").await.unwrap().as_deref(), Some("[1]"));

  store.delete("cart_1").await.unwrap();
  assert_eq!(store.get("cart_1").await.unwrap(), None);
  // Deleting again is fine.
  store.delete("cart_1").await.unwrap();
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let store = FileStore::open(dir.path()).await.unwrap();
  store.set("favorites_2", "[]".to_string()).await.unwrap();

  let names: Vec<String> = std::fs::read_dir(dir.path())
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["favorites_2.json".to_string()]);
}

#[tokio::test]
async fn test_odd_keys_stay_inside_root() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path().join("kv");
  let store = FileStore::open(&root).await.unwrap();

  store.set("../escape", "x".to_string()).await.unwrap();
  assert_eq!(store.get("../escape").await.unwrap().as_deref(), Some("x"));
  assert!(!dir.path().join("escape.json").exists());
  assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
}

#[tokio::test]
async fn test_cart_survives_restart() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let owner = OwnerKey::cart(&Identity::user(42));

  {
    let store = Arc::new(FileStore::open(dir.path()).await.unwrap());
    let mut cart = CartContainer::new(store);
    cart.add_item(&product(7, "10.0", "Couscous"), &owner).await.unwrap();
    cart.add_item(&product(7, "10.0", "Couscous"), &owner).await.unwrap();
    cart.add_item(&product(8, "2.25", "Mint"), &owner).await.unwrap();
  }

  let store = Arc::new(FileStore::open(dir.path()).await.unwrap());
  let mut cart = CartContainer::new(store);
  assert_eq!(cart.load(&owner).await, 2);
  assert_eq!(cart.get_quantity(7), 2);
  assert_eq!(cart.total_price(), price("22.25"));
}
