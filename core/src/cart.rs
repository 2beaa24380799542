// panier/src/cart.rs

//! The cart state container.
//!
//! Holds the line items of the currently active owner and mirrors them into
//! the key-value store under that owner's key. Every mutation builds the next
//! list on the side, persists it, and only then replaces the in-memory list,
//! so a failed write leaves the container exactly as it was.
//!
//! There is no internal locking. Mutations take `&mut self`; callers issue
//! them one after another (awaiting each), which is also what keeps the
//! read-modify-write against the store from losing updates.

use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{PanierError, PanierResult};
use crate::identity::OwnerKey;
use crate::model::{CartLineItem, Product, ProductId};
use crate::store::{json, KeyValueStore};

/// What `add_item` reports back for confirmation UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
  /// Number of distinct line items after the add.
  pub line_count: usize,
  /// Quantity of the added product after the add.
  pub quantity: u32,
}

#[derive(Debug)]
enum CartState {
  Unloaded,
  Loaded { owner: OwnerKey, items: Vec<CartLineItem> },
}

pub struct CartContainer<S: KeyValueStore + ?Sized> {
  store: Arc<S>,
  state: CartState,
}

impl<S: KeyValueStore + ?Sized> CartContainer<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      state: CartState::Unloaded,
    }
  }

  pub fn is_loaded(&self) -> bool {
    matches!(self.state, CartState::Loaded { .. })
  }

  pub fn owner(&self) -> Option<&OwnerKey> {
    match &self.state {
      CartState::Loaded { owner, .. } => Some(owner),
      CartState::Unloaded => None,
    }
  }

  /// Current line items, in the order they were first added. Empty when unloaded.
  pub fn items(&self) -> &[CartLineItem] {
    match &self.state {
      CartState::Loaded { items, .. } => items,
      CartState::Unloaded => &[],
    }
  }

  pub fn is_empty(&self) -> bool {
    self.items().is_empty()
  }

  pub fn line_count(&self) -> usize {
    self.items().len()
  }

  /// Quantity of `product_id` in memory, 0 when absent.
  pub fn get_quantity(&self, product_id: ProductId) -> u32 {
    self
      .items()
      .iter()
      .find(|item| item.product_id == product_id)
      .map(|item| item.quantity)
      .unwrap_or(0)
  }

  /// Sum of quantities.
  pub fn total_count(&self) -> u64 {
    self.items().iter().map(|item| u64::from(item.quantity)).sum()
  }

  /// Sum of `unit_price * quantity`, unrounded.
  pub fn total_price(&self) -> BigDecimal {
    self
      .items()
      .iter()
      .fold(BigDecimal::zero(), |acc, item| acc + item.line_total())
  }

  /// Drops the in-memory items without touching storage. Used on identity
  /// change and teardown.
  pub fn reset(&mut self) {
    if let Some(owner) = self.owner() {
      event!(Level::DEBUG, owner = %owner, "Cart reset.");
    }
    self.state = CartState::Unloaded;
  }

  /// Loads the list persisted for `owner`, replacing whatever was in memory,
  /// and returns the number of lines loaded.
  ///
  /// Never fails. Missing or unreadable data gives an empty cart. Guest owners
  /// always start empty since nothing is ever persisted for them.
  #[instrument(name = "CartContainer::load", skip(self, owner), fields(owner = %owner))]
  pub async fn load(&mut self, owner: &OwnerKey) -> usize {
    self.state = CartState::Unloaded;

    let items = if owner.is_guest() {
      event!(Level::DEBUG, "Guest owner, cart starts empty.");
      Vec::new()
    } else {
      normalize(json::load_list(&*self.store, owner.as_str()).await)
    };

    let line_count = items.len();
    event!(Level::DEBUG, line_count, "Cart loaded.");
    self.state = CartState::Loaded {
      owner: owner.clone(),
      items,
    };
    line_count
  }

  /// Adds one unit of `product`. A product already in the cart has its
  /// quantity bumped; a new one is appended with its current price and
  /// display fields.
  #[instrument(
    name = "CartContainer::add_item",
    skip(self, product, owner),
    fields(owner = %owner, product_id = product.id),
    err(Display)
  )]
  pub async fn add_item(&mut self, product: &Product, owner: &OwnerKey) -> PanierResult<AddOutcome> {
    require_authenticated(owner)?;
    self.ensure_loaded(owner).await;

    let mut next = self.items().to_vec();
    let quantity = match next.iter_mut().find(|item| item.product_id == product.id) {
      Some(existing) => {
        existing.quantity = existing.quantity.saturating_add(1);
        existing.quantity
      }
      None => {
        next.push(CartLineItem::from_product(product));
        1
      }
    };

    self.commit(owner, next).await?;
    event!(Level::INFO, quantity, "Product added to cart.");
    Ok(AddOutcome {
      line_count: self.line_count(),
      quantity,
    })
  }

  /// Removes the line for `product_id`. Returns whether a line was removed;
  /// an absent product is not an error and writes nothing.
  #[instrument(name = "CartContainer::remove_item", skip(self, owner), fields(owner = %owner), err(Display))]
  pub async fn remove_item(&mut self, product_id: ProductId, owner: &OwnerKey) -> PanierResult<bool> {
    require_authenticated(owner)?;
    self.ensure_loaded(owner).await;

    if !self.items().iter().any(|item| item.product_id == product_id) {
      event!(Level::DEBUG, "Product not in cart, nothing to remove.");
      return Ok(false);
    }

    let next: Vec<CartLineItem> = self
      .items()
      .iter()
      .filter(|item| item.product_id != product_id)
      .cloned()
      .collect();
    self.commit(owner, next).await?;
    event!(Level::INFO, "Product removed from cart.");
    Ok(true)
  }

  /// Sets the quantity of `product_id`. Anything below 1 removes the line.
  /// An absent product is left absent.
  #[instrument(name = "CartContainer::update_quantity", skip(self, owner), fields(owner = %owner), err(Display))]
  pub async fn update_quantity(
    &mut self,
    product_id: ProductId,
    new_quantity: i64,
    owner: &OwnerKey,
  ) -> PanierResult<()> {
    require_authenticated(owner)?;
    if new_quantity < 1 {
      self.remove_item(product_id, owner).await?;
      return Ok(());
    }
    self.ensure_loaded(owner).await;

    let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
    let mut next = self.items().to_vec();
    match next.iter_mut().find(|item| item.product_id == product_id) {
      Some(existing) if existing.quantity == quantity => return Ok(()),
      Some(existing) => existing.quantity = quantity,
      None => {
        event!(Level::DEBUG, "Product not in cart, quantity left unchanged.");
        return Ok(());
      }
    }

    self.commit(owner, next).await?;
    event!(Level::INFO, quantity, "Cart quantity updated.");
    Ok(())
  }

  /// Empties the cart of `owner` and deletes its storage key.
  #[instrument(name = "CartContainer::clear", skip(self, owner), fields(owner = %owner), err(Display))]
  pub async fn clear(&mut self, owner: &OwnerKey) -> PanierResult<()> {
    if !owner.is_guest() {
      json::delete_list(&*self.store, owner.as_str()).await?;
    }
    self.state = CartState::Loaded {
      owner: owner.clone(),
      items: Vec::new(),
    };
    event!(Level::INFO, "Cart cleared.");
    Ok(())
  }

  async fn ensure_loaded(&mut self, owner: &OwnerKey) {
    if self.owner() != Some(owner) {
      self.load(owner).await;
    }
  }

  async fn commit(&mut self, owner: &OwnerKey, next: Vec<CartLineItem>) -> PanierResult<()> {
    json::save_list(&*self.store, owner.as_str(), &next).await?;
    self.state = CartState::Loaded {
      owner: owner.clone(),
      items: next,
    };
    Ok(())
  }
}

pub(crate) fn require_authenticated(owner: &OwnerKey) -> PanierResult<()> {
  if owner.is_guest() {
    return Err(PanierError::NotAuthenticated {
      owner: owner.to_string(),
    });
  }
  Ok(())
}

/// Restores the container invariants on data read back from storage: no zero
/// quantities, one line per product (duplicates are merged into the first).
fn normalize(stored: Vec<CartLineItem>) -> Vec<CartLineItem> {
  let mut items: Vec<CartLineItem> = Vec::with_capacity(stored.len());
  for item in stored {
    if item.quantity == 0 {
      event!(Level::WARN, product_id = item.product_id, "Dropping stored line with zero quantity.");
      continue;
    }
    match items.iter_mut().find(|kept| kept.product_id == item.product_id) {
      Some(kept) => {
        event!(Level::WARN, product_id = item.product_id, "Merging duplicate stored line.");
        kept.quantity = kept.quantity.saturating_add(item.quantity);
      }
      None => items.push(item),
    }
  }
  items
}
