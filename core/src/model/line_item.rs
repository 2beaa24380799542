// panier/src/model/line_item.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::price;
use super::product::{Product, ProductDetails, ProductId};

/// One product entry in a cart.
///
/// Persisted as `{ "productId", "quantity", "price", ...display fields }`.
/// The price is the one seen when the product was first added and is never
/// refreshed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  pub product_id: ProductId,
  /// Always >= 1 once stored.
  pub quantity: u32,
  #[serde(rename = "price", with = "price")]
  pub unit_price: BigDecimal,
  #[serde(flatten)]
  pub details: ProductDetails,
}

impl CartLineItem {
  /// A fresh line with quantity 1, snapshotting price and display fields.
  pub fn from_product(product: &Product) -> Self {
    Self {
      product_id: product.id,
      quantity: 1,
      unit_price: product.price.clone(),
      details: product.details.clone(),
    }
  }

  pub fn line_total(&self) -> BigDecimal {
    &self.unit_price * BigDecimal::from(self.quantity)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn persisted_layout_flattens_display_fields() {
    let product = Product::new(
      7,
      BigDecimal::from_str("10.0").unwrap(),
      ProductDetails {
        name: Some("Couscous".to_string()),
        images: vec!["https://img/1.png".to_string()],
        stock: Some(30),
        ..Default::default()
      },
    );
    let item = CartLineItem::from_product(&product);
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["productId"], 7);
    assert_eq!(json["quantity"], 1);
    assert_eq!(json["price"], serde_json::json!(10.0));
    assert_eq!(json["name"], "Couscous");
    assert_eq!(json["stock"], 30);
    assert!(json.get("category").is_none());
  }

  #[test]
  fn cart_quantity_is_not_confused_with_stock() {
    let raw = r#"{"productId": 1, "quantity": 3, "price": "2.5", "stock": 40, "name": "Dates"}"#;
    let item: CartLineItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.quantity, 3);
    assert_eq!(item.details.stock, Some(40));
    assert_eq!(item.line_total(), BigDecimal::from_str("7.5").unwrap());
  }
}
