// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use panier::{
  BigDecimal, CheckoutForm, Identity, KeyValueStore, MemoryStore, PanierGateway, PanierRequest, Product,
  ProductDetails, StoreError,
};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::Level;

// --- Fixtures ---
pub fn price(text: &str) -> BigDecimal {
  BigDecimal::from_str(text).unwrap()
}

pub fn product(id: i64, unit_price: &str, name: &str) -> Product {
  Product::new(
    id,
    price(unit_price),
    ProductDetails {
      name: Some(name.to_string()),
      category: Some("Terroir".to_string()),
      images: vec![format!("https://cdn.example.ma/products/{}.jpg", id)],
      seller_full_name: Some("Coop Aït Baha".to_string()),
      seller_id: Some(900 + id),
      stock: Some(25),
      ..Default::default()
    },
  )
}

pub fn complete_form() -> CheckoutForm {
  CheckoutForm {
    full_name: "Youssef El Amrani".to_string(),
    email: "youssef@example.ma".to_string(),
    address: "3 Avenue Hassan II".to_string(),
    city: "Marrakech".to_string(),
    region: "Marrakech-Safi".to_string(),
    phone: "+212611111111".to_string(),
  }
}

pub fn user(id: u64) -> Identity {
  Identity::user(id)
}

// --- Stores ---

/// Memory store whose writes and deletes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct FlakyStore {
  pub inner: MemoryStore,
  pub fail_writes: AtomicBool,
  pub fail_reads: AtomicBool,
  pub writes: AtomicUsize,
}

impl FlakyStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn set_fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::SeqCst);
  }

  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(StoreError::Read {
        key: key.to_string(),
        source: anyhow::anyhow!("simulated read failure"),
      });
    }
    self.inner.get(key).await
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::Write {
        key: key.to_string(),
        source: anyhow::anyhow!("simulated disk full"),
      });
    }
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.inner.set(key, value).await
  }

  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::Delete {
        key: key.to_string(),
        source: anyhow::anyhow!("simulated disk full"),
      });
    }
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.inner.delete(key).await
  }
}

// --- Gateways ---

/// Records submitted paniers; fails every call while `reject` is set.
#[derive(Debug, Default)]
pub struct RecordingGateway {
  pub submitted: Mutex<Vec<(Identity, PanierRequest)>>,
  pub reject: AtomicBool,
}

#[async_trait]
impl PanierGateway for RecordingGateway {
  async fn submit(&self, identity: &Identity, _form: &CheckoutForm, request: &PanierRequest) -> anyhow::Result<()> {
    if self.reject.load(Ordering::SeqCst) {
      anyhow::bail!("backend answered 503");
    }
    self.submitted.lock().push((*identity, request.clone()));
    Ok(())
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
