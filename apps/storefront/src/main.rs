//! `grace` - drive the storefront engine from a terminal.
//!
//! Every subcommand prints JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use grace_core::ProductId;
use grace_storefront::{init_tracing, LogEmitter, StorefrontConfig, SyncFacade};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "grace")]
#[command(version)]
#[command(about = "Urban Grace storefront: browse the catalog and manage the cart", long_about = None)]
struct Cli {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List in-scope products
    Products {
        /// "all" or a category, e.g. "jewelery"
        #[arg(short = 'C', long, default_value = "all")]
        category: String,
    },
    /// List category buttons
    Categories,
    /// Show the persisted cart
    Cart,
    /// Add a product to the cart
    Add { id: ProductId },
    /// Increase a line by one
    Inc { id: ProductId },
    /// Decrease a line by one (removes it at 1)
    Dec { id: ProductId },
    /// Set a line's quantity (0 removes it)
    Set {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a line
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
}

impl Commands {
    /// `cart` shows the restored cart without reaching the Catalog Source.
    fn needs_catalog(&self) -> bool {
        !matches!(self, Commands::Cart)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = StorefrontConfig::load(cli.config).context("loading configuration")?;
    info!(catalog = %config.catalog.url, "Starting storefront");

    let mut facade = SyncFacade::connect(&config, Arc::new(LogEmitter))
        .await
        .context("opening storefront")?;

    if cli.command.needs_catalog() {
        facade.load_catalog().await.context("loading catalog")?;
    }

    match cli.command {
        Commands::Products { category } => print_json(&facade.filter_products(&category)?),
        Commands::Categories => print_json(&facade.categories()?),
        Commands::Cart => print_json(&facade.snapshot()),
        Commands::Add { id } => print_json(&facade.add_to_cart(id).await?),
        Commands::Inc { id } => print_json(&facade.increment_item(id).await?),
        Commands::Dec { id } => print_json(&facade.decrement_item(id).await?),
        Commands::Set { id, qty } => print_json(&facade.update_quantity(id, qty).await?),
        Commands::Remove { id } => print_json(&facade.remove_from_cart(id).await?),
        Commands::Clear => print_json(&facade.clear_cart().await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
