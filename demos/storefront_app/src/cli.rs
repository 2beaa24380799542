// demos/storefront_app/src/cli.rs

use clap::{Args, Parser, Subcommand};
use panier::{BigDecimal, CheckoutForm, Product, ProductDetails, ProductId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Drive the local cart and favorites of the storefront")]
pub struct Cli {
  /// Overrides STOREFRONT_DATA_DIR.
  #[arg(long, global = true)]
  pub data_dir: Option<PathBuf>,

  /// Overrides STOREFRONT_USER_ID.
  #[arg(long, global = true, conflicts_with = "guest")]
  pub user: Option<u64>,

  /// Run as the signed-out guest.
  #[arg(long, global = true)]
  pub guest: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print the cart with its totals.
  Show,
  /// Add one unit of a product to the cart.
  Add(ProductArgs),
  /// Remove a product line from the cart.
  Remove {
    #[arg(long)]
    id: ProductId,
  },
  /// Set the quantity of a line; anything below 1 removes it.
  SetQty {
    #[arg(long)]
    id: ProductId,
    #[arg(long, allow_negative_numbers = true)]
    qty: i64,
  },
  /// Empty the cart.
  Clear,
  /// Toggle a product in the favorites list.
  Fav(ProductArgs),
  /// List favorites, optionally filtered.
  Favorites {
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    category: Option<String>,
  },
  /// Submit the cart as a panier and clear it.
  Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
pub struct ProductArgs {
  #[arg(long)]
  pub id: ProductId,
  #[arg(long)]
  pub price: BigDecimal,
  #[arg(long)]
  pub name: Option<String>,
  #[arg(long)]
  pub category: Option<String>,
  #[arg(long)]
  pub seller_id: Option<i64>,
}

impl ProductArgs {
  pub fn to_product(&self) -> Product {
    Product::new(
      self.id,
      self.price.clone(),
      ProductDetails {
        name: self.name.clone(),
        category: self.category.clone(),
        seller_id: self.seller_id,
        ..Default::default()
      },
    )
  }
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
  #[arg(long)]
  pub full_name: String,
  #[arg(long)]
  pub email: String,
  #[arg(long)]
  pub address: String,
  #[arg(long)]
  pub city: String,
  #[arg(long)]
  pub region: String,
  #[arg(long)]
  pub phone: String,
}

impl From<CheckoutArgs> for CheckoutForm {
  fn from(args: CheckoutArgs) -> Self {
    CheckoutForm {
      full_name: args.full_name,
      email: args.email,
      address: args.address,
      city: args.city,
      region: args.region,
      phone: args.phone,
    }
  }
}
