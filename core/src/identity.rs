// panier/src/identity.rs

//! Who is using the storefront, and the storage keys derived from that.
//!
//! Every persisted list lives under a key built here. Call sites never format
//! keys themselves, so the cart of user 42 is always `cart_42` and the guest
//! sentinel is always `cart_guest`.

use std::fmt;

const GUEST_SUFFIX: &str = "guest";
const CART_PREFIX: &str = "cart";
const FAVORITES_PREFIX: &str = "favorites";

/// The active identity of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
  #[default]
  Guest,
  User { id: u64 },
}

impl Identity {
  pub fn user(id: u64) -> Self {
    Identity::User { id }
  }

  pub fn is_authenticated(&self) -> bool {
    matches!(self, Identity::User { .. })
  }

  pub fn user_id(&self) -> Option<u64> {
    match self {
      Identity::User { id } => Some(*id),
      Identity::Guest => None,
    }
  }
}

/// Storage partition identifier, e.g. `cart_42` or `favorites_guest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerKey(String);

impl OwnerKey {
  pub fn cart(identity: &Identity) -> Self {
    Self::derive(CART_PREFIX, identity)
  }

  pub fn favorites(identity: &Identity) -> Self {
    Self::derive(FAVORITES_PREFIX, identity)
  }

  fn derive(prefix: &str, identity: &Identity) -> Self {
    match identity {
      Identity::User { id } => OwnerKey(format!("{}_{}", prefix, id)),
      Identity::Guest => OwnerKey(format!("{}_{}", prefix, GUEST_SUFFIX)),
    }
  }

  /// Wraps an already-built key such as one read back from a log or a test.
  /// Anything whose suffix is not a decimal user id counts as a guest key.
  pub fn from_raw(raw: impl Into<String>) -> Self {
    OwnerKey(raw.into())
  }

  /// The user this key belongs to, if any.
  pub fn identity(&self) -> Identity {
    let suffix = match self.0.rsplit_once('_') {
      Some((_, suffix)) => suffix,
      None => return Identity::Guest,
    };
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
      return Identity::Guest;
    }
    match suffix.parse::<u64>() {
      Ok(id) => Identity::User { id },
      Err(_) => Identity::Guest,
    }
  }

  pub fn is_guest(&self) -> bool {
    !self.identity().is_authenticated()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for OwnerKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for OwnerKey {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
