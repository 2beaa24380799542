// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use panier::Identity;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Root of the file-backed key-value store.
  pub data_dir: PathBuf,
  /// Signed-in user; `None` runs as guest.
  pub user_id: Option<u64>,
  /// Emit logs as JSON lines instead of the human format.
  pub log_json: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let data_dir = get_env("STOREFRONT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(".storefront"));

    let user_id = get_env("STOREFRONT_USER_ID")
      .map(|raw| {
        raw
          .trim()
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_USER_ID '{}': {}", raw, e)))
      })
      .transpose()?;

    let log_json = get_env("STOREFRONT_LOG_JSON")
      .unwrap_or_else(|| "false".to_string())
      .trim()
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_LOG_JSON value: {}", e)))?;

    Ok(Self {
      data_dir,
      user_id,
      log_json,
    })
  }

  /// Applies command-line overrides on top of the environment.
  pub fn with_overrides(mut self, data_dir: Option<PathBuf>, user_id: Option<u64>, guest: bool) -> Self {
    if let Some(dir) = data_dir {
      self.data_dir = dir;
    }
    if let Some(id) = user_id {
      self.user_id = Some(id);
    }
    if guest {
      self.user_id = None;
    }
    self
  }

  pub fn identity(&self) -> Identity {
    match self.user_id {
      Some(id) => Identity::user(id),
      None => Identity::Guest,
    }
  }

  pub fn store_dir(&self) -> PathBuf {
    self.data_dir.join("kv")
  }

  pub fn outbox_dir(&self) -> PathBuf {
    self.data_dir.join("submitted")
  }
}
