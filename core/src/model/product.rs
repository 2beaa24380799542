// panier/src/model/product.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::price;

/// Catalog identifier of a product. Opaque to the containers.
pub type ProductId = i64;

const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Display fields copied from the catalog when a product is added to the cart
/// or to the favorites. Any of them may be missing in a payload; the accessors
/// below always hand back a usable default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
  pub images: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seller_full_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seller_id: Option<i64>,
  /// Stock reported by the catalog at snapshot time. The catalog calls it `quantity`.
  #[serde(default, alias = "quantity", skip_serializing_if = "Option::is_none")]
  pub stock: Option<u32>,
}

impl ProductDetails {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      ..Default::default()
    }
  }

  pub fn display_name(&self) -> &str {
    self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(UNNAMED_PRODUCT)
  }

  pub fn description_or_default(&self) -> &str {
    self.description.as_deref().unwrap_or("")
  }

  pub fn category_or_default(&self) -> &str {
    self.category.as_deref().unwrap_or("")
  }

  pub fn primary_image(&self) -> Option<&str> {
    self.images.first().map(String::as_str).filter(|url| !url.is_empty())
  }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A product as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  #[serde(with = "price")]
  pub price: BigDecimal,
  #[serde(flatten)]
  pub details: ProductDetails,
}

impl Product {
  pub fn new(id: ProductId, price: BigDecimal, details: ProductDetails) -> Self {
    Self { id, price, details }
  }
}
