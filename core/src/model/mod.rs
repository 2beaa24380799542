// panier/src/model/mod.rs

//! Data carried by the cart and favorites containers.

pub mod line_item;
pub mod price;
pub mod product;

pub use line_item::CartLineItem;
pub use product::{Product, ProductDetails, ProductId};
