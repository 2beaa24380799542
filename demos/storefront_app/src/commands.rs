// demos/storefront_app/src/commands.rs

use crate::cli::Command;
use crate::errors::{AppError, Result as AppResult};
use panier::{
  BigDecimal, CartLineItem, CatalogFilter, CheckoutForm, KeyValueStore, PanierGateway, Product, StorefrontSession,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
  owner: String,
  items: &'a [CartLineItem],
  total_count: u64,
  #[serde(with = "panier::model::price")]
  total_price: BigDecimal,
}

fn cart_view<S: KeyValueStore + ?Sized>(session: &StorefrontSession<S>) -> AppResult<Value> {
  let cart = session.cart();
  let view = CartView {
    owner: session.cart_key().to_string(),
    items: cart.items(),
    total_count: cart.total_count(),
    total_price: cart.total_price(),
  };
  Ok(serde_json::to_value(view)?)
}

fn favorites_view(items: &[&Product]) -> AppResult<Value> {
  Ok(json!({
    "count": items.len(),
    "items": serde_json::to_value(items)?,
  }))
}

/// Runs one subcommand against the session and returns what should be printed.
#[instrument(skip_all, fields(identity = ?session.identity()))]
pub async fn run<S, G>(command: Command, session: &mut StorefrontSession<S>, gateway: &G) -> AppResult<Value>
where
  S: KeyValueStore + ?Sized,
  G: PanierGateway + ?Sized,
{
  match command {
    Command::Show => cart_view(session),

    Command::Add(args) => {
      let product = args.to_product();
      let outcome = session.add_to_cart(&product).await?;
      info!(product_id = product.id, quantity = outcome.quantity, "Added to cart.");
      Ok(json!({
        "added": product.id,
        "quantity": outcome.quantity,
        "lineCount": outcome.line_count,
        "cart": cart_view(session)?,
      }))
    }

    Command::Remove { id } => {
      if !session.remove_from_cart(id).await? {
        return Err(AppError::NotFound(format!("Product {} is not in the cart", id)));
      }
      Ok(json!({ "removed": id, "cart": cart_view(session)? }))
    }

    Command::SetQty { id, qty } => {
      session.update_quantity(id, qty).await?;
      Ok(json!({
        "productId": id,
        "quantity": session.cart().get_quantity(id),
        "cart": cart_view(session)?,
      }))
    }

    Command::Clear => {
      session.clear_cart().await?;
      cart_view(session)
    }

    Command::Fav(args) => {
      let product = args.to_product();
      let favorite = session.toggle_favorite(&product).await?;
      Ok(json!({ "productId": product.id, "favorite": favorite }))
    }

    Command::Favorites { query, category } => {
      let mut filter = CatalogFilter::new();
      if let Some(q) = query {
        filter = filter.with_query(q);
      }
      if let Some(c) = category {
        filter = filter.with_category(c);
      }
      favorites_view(&filter.apply(session.favorites().items()))
    }

    Command::Checkout(args) => {
      let form: CheckoutForm = args.into();
      let request = session.checkout(&form, gateway).await?;
      Ok(json!({ "submitted": serde_json::to_value(&request)? }))
    }
  }
}
