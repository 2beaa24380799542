// panier/src/favorites.rs

//! Favorite products of the active owner, persisted the same way as the cart:
//! one JSON array per owner key, rewritten whole after each change.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::cart::require_authenticated;
use crate::error::PanierResult;
use crate::identity::OwnerKey;
use crate::model::{Product, ProductId};
use crate::store::{json, KeyValueStore};

pub struct FavoritesContainer<S: KeyValueStore + ?Sized> {
  store: Arc<S>,
  owner: Option<OwnerKey>,
  items: Vec<Product>,
}

impl<S: KeyValueStore + ?Sized> FavoritesContainer<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      owner: None,
      items: Vec::new(),
    }
  }

  pub fn owner(&self) -> Option<&OwnerKey> {
    self.owner.as_ref()
  }

  pub fn items(&self) -> &[Product] {
    &self.items
  }

  pub fn is_favorite(&self, product_id: ProductId) -> bool {
    self.items.iter().any(|p| p.id == product_id)
  }

  pub fn reset(&mut self) {
    self.owner = None;
    self.items.clear();
  }

  #[instrument(name = "FavoritesContainer::load", skip(self, owner), fields(owner = %owner))]
  pub async fn load(&mut self, owner: &OwnerKey) -> usize {
    self.reset();
    let mut items: Vec<Product> = if owner.is_guest() {
      Vec::new()
    } else {
      json::load_list(&*self.store, owner.as_str()).await
    };

    let mut seen = std::collections::HashSet::new();
    items.retain(|p| seen.insert(p.id));

    self.owner = Some(owner.clone());
    self.items = items;
    event!(Level::DEBUG, count = self.items.len(), "Favorites loaded.");
    self.items.len()
  }

  /// Flips the favorite state of `product` and returns the new state.
  #[instrument(
    name = "FavoritesContainer::toggle",
    skip(self, product, owner),
    fields(owner = %owner, product_id = product.id),
    err(Display)
  )]
  pub async fn toggle(&mut self, product: &Product, owner: &OwnerKey) -> PanierResult<bool> {
    require_authenticated(owner)?;
    self.ensure_loaded(owner).await;
    if self.is_favorite(product.id) {
      self.remove(product.id, owner).await?;
      Ok(false)
    } else {
      self.add(product, owner).await?;
      Ok(true)
    }
  }

  /// Returns `false` when the product was already a favorite.
  pub async fn add(&mut self, product: &Product, owner: &OwnerKey) -> PanierResult<bool> {
    require_authenticated(owner)?;
    self.ensure_loaded(owner).await;
    if self.is_favorite(product.id) {
      return Ok(false);
    }
    let mut next = self.items.clone();
    next.push(product.clone());
    self.commit(owner, next).await?;
    event!(Level::INFO, owner = %owner, product_id = product.id, "Added to favorites.");
    Ok(true)
  }

  /// Returns `false` when the product was not a favorite.
  pub async fn remove(&mut self, product_id: ProductId, owner: &OwnerKey) -> PanierResult<bool> {
    require_authenticated(owner)?;
    self.ensure_loaded(owner).await;
    if !self.is_favorite(product_id) {
      return Ok(false);
    }
    let next: Vec<Product> = self.items.iter().filter(|p| p.id != product_id).cloned().collect();
    self.commit(owner, next).await?;
    event!(Level::INFO, owner = %owner, product_id, "Removed from favorites.");
    Ok(true)
  }

  pub async fn clear(&mut self, owner: &OwnerKey) -> PanierResult<()> {
    if !owner.is_guest() {
      json::delete_list(&*self.store, owner.as_str()).await?;
    }
    self.owner = Some(owner.clone());
    self.items.clear();
    Ok(())
  }

  async fn ensure_loaded(&mut self, owner: &OwnerKey) {
    if self.owner.as_ref() != Some(owner) {
      self.load(owner).await;
    }
  }

  async fn commit(&mut self, owner: &OwnerKey, next: Vec<Product>) -> PanierResult<()> {
    json::save_list(&*self.store, owner.as_str(), &next).await?;
    self.owner = Some(owner.clone());
    self.items = next;
    Ok(())
  }
}
