// panier/src/catalog.rs

//! Search and category filtering over a fetched product listing.

use crate::model::Product;

/// Category label that selects every product.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
  /// Case-insensitive substring matched against name or description.
  pub query: Option<String>,
  /// Case-insensitive category; `None` or `"All"` disables the filter.
  pub category: Option<String>,
}

impl CatalogFilter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into());
    self
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn matches(&self, product: &Product) -> bool {
    self.matches_query(product) && self.matches_category(product)
  }

  pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
    products.iter().filter(|p| self.matches(p)).collect()
  }

  fn matches_query(&self, product: &Product) -> bool {
    let needle = match self.query.as_deref().map(str::trim) {
      Some(q) if !q.is_empty() => q.to_lowercase(),
      _ => return true,
    };
    let name = product.details.name.as_deref().unwrap_or("").to_lowercase();
    let description = product.details.description_or_default().to_lowercase();
    name.contains(&needle) || description.contains(&needle)
  }

  fn matches_category(&self, product: &Product) -> bool {
    match self.category.as_deref() {
      None => true,
      Some(c) if c == ALL_CATEGORIES => true,
      Some(c) => product.details.category_or_default().to_lowercase() == c.to_lowercase(),
    }
  }
}
