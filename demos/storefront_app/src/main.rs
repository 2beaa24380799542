// demos/storefront_app/src/main.rs

// Declare modules for the application
mod cli;
mod commands;
mod config;
mod errors;
mod services;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::Result as AppResult; // Use the app's Result alias
use crate::services::OutboxGateway;

use clap::Parser;
use panier::{FileStore, StorefrontSession};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  // Logs go to stderr so stdout stays machine-readable.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn run(cli: Cli, config: AppConfig) -> AppResult<serde_json::Value> {
  let identity = config.identity();
  let store = FileStore::open(config.store_dir()).await?;
  tracing::debug!(root = %store.root().display(), "Opened file store.");

  let mut session = StorefrontSession::init(Arc::new(store), identity).await;
  let gateway = OutboxGateway::new(config.outbox_dir());
  commands::run(cli.command, &mut session, &gateway).await
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  // Load application configuration
  let config = match AppConfig::from_env() {
    Ok(cfg) => cfg.with_overrides(cli.data_dir.clone(), cli.user, cli.guest),
    Err(e) => {
      eprintln!("{}", e);
      return ExitCode::from(e.exit_code() as u8);
    }
  };
  init_tracing(config.log_json);
  tracing::info!(data_dir = %config.data_dir.display(), identity = ?config.identity(), "Starting storefront.");

  match run(cli, config).await {
    Ok(output) => match serde_json::to_string_pretty(&output) {
      Ok(text) => {
        println!("{}", text);
        ExitCode::SUCCESS
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to render output.");
        ExitCode::FAILURE
      }
    },
    Err(e) => {
      tracing::error!(error = %e, "Command failed.");
      eprintln!("{}", e);
      ExitCode::from(e.exit_code() as u8)
    }
  }
}
