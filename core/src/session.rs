// panier/src/session.rs

//! One place that owns the per-identity state of the app.
//!
//! A `StorefrontSession` is created once at app start and handed to whatever
//! needs the cart or favorites. On login, logout or account switch the caller
//! invokes [`StorefrontSession::switch_identity`], which drops the previous
//! owner's items from memory and loads the new owner's lists. Storage keys are
//! derived here, never at call sites.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::cart::{AddOutcome, CartContainer};
use crate::checkout::{self, CheckoutForm, PanierGateway, PanierRequest};
use crate::error::PanierResult;
use crate::favorites::FavoritesContainer;
use crate::identity::{Identity, OwnerKey};
use crate::model::{Product, ProductId};
use crate::store::KeyValueStore;

pub struct StorefrontSession<S: KeyValueStore + ?Sized> {
  identity: Identity,
  cart: CartContainer<S>,
  favorites: FavoritesContainer<S>,
}

impl<S: KeyValueStore + ?Sized> StorefrontSession<S> {
  /// Builds the session and loads both lists for `identity`.
  #[instrument(name = "StorefrontSession::init", skip(store))]
  pub async fn init(store: Arc<S>, identity: Identity) -> Self {
    let mut session = Self {
      identity,
      cart: CartContainer::new(Arc::clone(&store)),
      favorites: FavoritesContainer::new(store),
    };
    session.reload().await;
    session
  }

  pub fn identity(&self) -> &Identity {
    &self.identity
  }

  pub fn cart(&self) -> &CartContainer<S> {
    &self.cart
  }

  pub fn favorites(&self) -> &FavoritesContainer<S> {
    &self.favorites
  }

  pub fn cart_key(&self) -> OwnerKey {
    OwnerKey::cart(&self.identity)
  }

  pub fn favorites_key(&self) -> OwnerKey {
    OwnerKey::favorites(&self.identity)
  }

  /// Login, logout or account switch. The previous owner's data stays in
  /// storage untouched; only the in-memory view changes.
  #[instrument(name = "StorefrontSession::switch_identity", skip(self), fields(from = ?self.identity))]
  pub async fn switch_identity(&mut self, identity: Identity) {
    self.cart.reset();
    self.favorites.reset();
    self.identity = identity;
    self.reload().await;
    event!(Level::INFO, to = ?identity, "Identity switched.");
  }

  /// Re-reads both lists from storage for the current identity.
  pub async fn reload(&mut self) {
    let cart_key = self.cart_key();
    let favorites_key = self.favorites_key();
    self.cart.load(&cart_key).await;
    self.favorites.load(&favorites_key).await;
  }

  pub async fn add_to_cart(&mut self, product: &Product) -> PanierResult<AddOutcome> {
    let key = self.cart_key();
    self.cart.add_item(product, &key).await
  }

  pub async fn remove_from_cart(&mut self, product_id: ProductId) -> PanierResult<bool> {
    let key = self.cart_key();
    self.cart.remove_item(product_id, &key).await
  }

  pub async fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> PanierResult<()> {
    let key = self.cart_key();
    self.cart.update_quantity(product_id, quantity, &key).await
  }

  pub async fn clear_cart(&mut self) -> PanierResult<()> {
    let key = self.cart_key();
    self.cart.clear(&key).await
  }

  pub async fn toggle_favorite(&mut self, product: &Product) -> PanierResult<bool> {
    let key = self.favorites_key();
    self.favorites.toggle(product, &key).await
  }

  pub async fn checkout<G>(&mut self, form: &CheckoutForm, gateway: &G) -> PanierResult<PanierRequest>
  where
    G: PanierGateway + ?Sized,
  {
    checkout::checkout(&mut self.cart, &self.identity, form, gateway).await
  }
}
