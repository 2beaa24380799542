// demos/storefront_app/src/errors.rs

use panier::PanierError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Cart Error: {source}")]
  Panier {
    #[from] // Allows conversion from panier::PanierError
    source: PanierError,
  },

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON Error: {0}")]
  Json(#[from] serde_json::Error),
}

impl AppError {
  /// Process exit code for this error: 2 for usage problems, 3 when a login
  /// is required, 1 otherwise.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Config(_) | AppError::NotFound(_) => 2,
      AppError::Panier { source } if source.is_not_authenticated() => 3,
      _ => 1,
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use panier::{Identity, OwnerKey};

  #[test]
  fn exit_codes_follow_the_error_kind() {
    assert_eq!(AppError::Config("bad".to_string()).exit_code(), 2);
    assert_eq!(AppError::NotFound("product 9".to_string()).exit_code(), 2);

    let login = AppError::from(PanierError::NotAuthenticated {
      owner: OwnerKey::cart(&Identity::Guest).to_string(),
    });
    assert_eq!(login.exit_code(), 3);

    assert_eq!(AppError::from(PanierError::EmptyCart).exit_code(), 1);
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    assert_eq!(AppError::from(io).exit_code(), 1);
  }
}
