// panier/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum PanierError {
  /// Mutations are refused for the guest owner; the caller should prompt a login.
  #[error("Not authenticated: '{owner}' cannot be modified without a signed-in user")]
  NotAuthenticated { owner: String },

  /// The persist step failed. In-memory state was left as it was before the call.
  #[error("Failed to persist '{key}'. Source: {source}")]
  StorageWrite {
    key: String,
    #[source]
    source: StoreError,
  },

  #[error("Failed to delete '{key}'. Source: {source}")]
  StorageDelete {
    key: String,
    #[source]
    source: StoreError,
  },

  #[error("Failed to serialize list for '{key}'. Source: {source}")]
  Serialization {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Checkout form is missing '{field}'")]
  InvalidCheckout { field: &'static str },

  #[error("Cannot check out an empty cart")]
  EmptyCart,

  #[error("Panier submission failed. Source: {source}")]
  Submission {
    #[source]
    source: AnyhowError,
  },
}

impl PanierError {
  pub fn is_not_authenticated(&self) -> bool {
    matches!(self, PanierError::NotAuthenticated { .. })
  }
}

pub type PanierResult<T, E = PanierError> = std::result::Result<T, E>;
