// demos/storefront_app/src/services/panier_outbox.rs

//! Stand-in for the backend order API: every submitted panier is written as a
//! JSON file into an outbox directory.

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panier::{CheckoutForm, Identity, PanierGateway, PanierRequest};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedPanier<'a> {
  id: Uuid,
  user_id: u64,
  submitted_at: DateTime<Utc>,
  shipping: &'a CheckoutForm,
  #[serde(flatten)]
  request: &'a PanierRequest,
}

#[derive(Debug, Clone)]
pub struct OutboxGateway {
  dir: PathBuf,
}

impl OutboxGateway {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }
}

#[async_trait]
impl PanierGateway for OutboxGateway {
  #[instrument(name = "OutboxGateway::submit", skip_all, fields(identity = ?identity, lines = request.items.len()))]
  async fn submit(&self, identity: &Identity, form: &CheckoutForm, request: &PanierRequest) -> anyhow::Result<()> {
    let user_id = match identity.user_id() {
      Some(id) => id,
      None => bail!("Refusing to submit a panier without a signed-in user"),
    };

    let submitted = SubmittedPanier {
      id: Uuid::new_v4(),
      user_id,
      submitted_at: Utc::now(),
      shipping: form,
      request,
    };
    let body = serde_json::to_vec_pretty(&submitted).context("Failed to encode panier")?;

    tokio::fs::create_dir_all(&self.dir)
      .await
      .with_context(|| format!("Failed to create outbox '{}'", self.dir.display()))?;
    let path = self.dir.join(format!("panier_{}_{}.json", user_id, submitted.id));
    tokio::fs::write(&path, body)
      .await
      .with_context(|| format!("Failed to write '{}'", path.display()))?;

    info!(path = %path.display(), total = %request.total, "Panier written to outbox.");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use panier::{BigDecimal, CartLineItem, Product, ProductDetails};
  use std::str::FromStr;

  fn request() -> PanierRequest {
    let product = Product::new(5, BigDecimal::from_str("7.5").unwrap(), ProductDetails::named("Amlou"));
    PanierRequest::from_items(&[CartLineItem::from_product(&product)])
  }

  #[tokio::test]
  async fn writes_one_file_per_submission() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = OutboxGateway::new(dir.path().join("submitted"));
    let form = CheckoutForm::default();

    gateway.submit(&Identity::user(3), &form, &request()).await.unwrap();

    let files: Vec<_> = std::fs::read_dir(gateway.dir()).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(files.len(), 1);
    let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&files[0]).unwrap()).unwrap();
    assert_eq!(doc["userId"], 3);
    assert_eq!(doc["items"][0]["productId"], 5);
    assert_eq!(doc["total"], 7.5);
  }

  #[tokio::test]
  async fn guest_submission_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = OutboxGateway::new(dir.path());
    let result = gateway.submit(&Identity::Guest, &CheckoutForm::default(), &request()).await;
    assert!(result.is_err());
  }
}
