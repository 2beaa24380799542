// src/lib.rs

//! Panier: client-side cart and favorites state for the Taawoniyate storefront.
//!
//! The backend owns orders, stock and accounts. What lives on the device is
//! the user's cart and favorites, kept in a local key-value store and
//! partitioned per signed-in user:
//!  - `CartContainer`: line items with snapshotted prices, quantity updates, totals.
//!  - `FavoritesContainer`: a set of favorite products.
//!  - `StorefrontSession`: owns both and swaps them on login/logout.
//!  - `checkout`: turns a cart into a panier request for the backend.
//!  - `CatalogFilter`: search and category filtering of a product listing.
//!
//! Storage is pluggable through the async `KeyValueStore` trait; `MemoryStore`
//! and `FileStore` are provided.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod model;
pub mod session;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::cart::{AddOutcome, CartContainer};
pub use crate::catalog::{CatalogFilter, ALL_CATEGORIES};
pub use crate::checkout::{checkout, CheckoutForm, PanierGateway, PanierLine, PanierRequest};
pub use crate::error::{PanierError, PanierResult};
pub use crate::favorites::FavoritesContainer;
pub use crate::identity::{Identity, OwnerKey};
pub use crate::model::{CartLineItem, Product, ProductDetails, ProductId};
pub use crate::session::StorefrontSession;
pub use crate::store::{FileStore, KeyValueStore, MemoryStore, StoreError};

// BigDecimal shows up in every price-facing signature.
pub use bigdecimal::BigDecimal;

/*
    Typical flow:
    1. Open a store (`FileStore::open(dir)` on device, `MemoryStore::new()` in tests).
    2. `StorefrontSession::init(Arc::new(store), identity)` at app start.
    3. UI actions call `add_to_cart`, `update_quantity`, `toggle_favorite`, ...
       one at a time, awaiting each.
    4. On login/logout call `switch_identity`.
    5. `checkout(form, gateway)` submits the cart and clears it on success.
*/
