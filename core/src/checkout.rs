// panier/src/checkout.rs

//! Hand-off of a finished cart to the backend as a panier.
//!
//! The backend call itself sits behind [`PanierGateway`]; this module only
//! decides whether a checkout may proceed, what gets sent, and what happens
//! to the local cart afterwards.

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::cart::{require_authenticated, CartContainer};
use crate::error::{PanierError, PanierResult};
use crate::identity::{Identity, OwnerKey};
use crate::model::{price, CartLineItem, ProductId};
use crate::store::KeyValueStore;

/// Shipping details collected on the cart screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
  pub full_name: String,
  pub email: String,
  pub address: String,
  pub city: String,
  pub region: String,
  pub phone: String,
}

impl CheckoutForm {
  /// Every field is required; the first blank one is reported.
  pub fn validate(&self) -> PanierResult<()> {
    let fields: [(&'static str, &str); 6] = [
      ("fullName", &self.full_name),
      ("email", &self.email),
      ("address", &self.address),
      ("city", &self.city),
      ("region", &self.region),
      ("phone", &self.phone),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
      Some((field, _)) => Err(PanierError::InvalidCheckout { field: *field }),
      None => Ok(()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanierLine {
  pub product_id: ProductId,
  pub quantity: u32,
  #[serde(with = "price")]
  pub price: BigDecimal,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seller_id: Option<i64>,
}

/// Payload submitted to the backend. Prices are the ones snapshotted in the
/// cart; reconciling them with the catalog is the backend's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanierRequest {
  pub items: Vec<PanierLine>,
  #[serde(with = "price")]
  pub total: BigDecimal,
}

impl PanierRequest {
  pub fn from_items(items: &[CartLineItem]) -> Self {
    let lines = items
      .iter()
      .map(|item| PanierLine {
        product_id: item.product_id,
        quantity: item.quantity,
        price: item.unit_price.clone(),
        seller_id: item.details.seller_id,
      })
      .collect();
    let total = items.iter().fold(BigDecimal::zero(), |acc, item| acc + item.line_total());
    Self { items: lines, total }
  }
}

/// The remote order API, as far as checkout is concerned.
#[async_trait]
pub trait PanierGateway: Send + Sync {
  async fn submit(&self, identity: &Identity, form: &CheckoutForm, request: &PanierRequest) -> anyhow::Result<()>;
}

/// Submits the cart of `identity` and clears it once the gateway accepts it.
///
/// Nothing is sent for a guest, an incomplete form or an empty cart. If the
/// gateway fails the cart is kept as is so the user can retry.
#[instrument(name = "checkout", skip_all, fields(identity = ?identity), err(Display))]
pub async fn checkout<S, G>(
  cart: &mut CartContainer<S>,
  identity: &Identity,
  form: &CheckoutForm,
  gateway: &G,
) -> PanierResult<PanierRequest>
where
  S: KeyValueStore + ?Sized,
  G: PanierGateway + ?Sized,
{
  let owner = OwnerKey::cart(identity);
  require_authenticated(&owner)?;
  form.validate()?;

  if cart.owner() != Some(&owner) {
    cart.load(&owner).await;
  }
  if cart.is_empty() {
    return Err(PanierError::EmptyCart);
  }

  let request = PanierRequest::from_items(cart.items());
  gateway
    .submit(identity, form, &request)
    .await
    .map_err(|source| PanierError::Submission { source })?;
  event!(Level::INFO, lines = request.items.len(), total = %request.total, "Panier submitted.");

  cart.clear(&owner).await?;
  Ok(request)
}
