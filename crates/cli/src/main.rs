//! Vitrine CLI - storefront library surface.
//!
//! # Usage
//!
//! ```bash
//! # Show a catalog product with options and availability
//! vitrine product show 1
//!
//! # Estimate shipping for a CEP
//! vitrine shipping estimate 01310-930
//!
//! # Manage the file-backed cart
//! vitrine cart add --product 1 --size 38 --color Preto --quantity 2
//! vitrine cart list
//! vitrine cart set-quantity --product 1 --size 38 --color Preto 5
//! vitrine cart remove --product 1 --size 38 --color Preto
//! vitrine cart clear
//! ```
//!
//! # Commands
//!
//! - `product show` - Fetch and display a catalog product
//! - `shipping estimate` - Quote shipping options for a postal code
//! - `cart` - Inspect and mutate the cart stored at `VITRINE_CART_PATH`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect catalog products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Shipping estimates
    Shipping {
        #[command(subcommand)]
        action: ShippingAction,
    },
    /// Manage the file-backed cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Fetch and display a product
    Show {
        /// Numeric product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ShippingAction {
    /// Quote shipping options for a postal code
    Estimate {
        /// CEP, with or without the dash
        cep: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines with the subtotal
    List,
    /// Add an item, merging with an existing identical line
    Add {
        /// Numeric product id
        #[arg(short, long)]
        product: i64,

        /// Size value (e.g., 38)
        #[arg(short, long)]
        size: Option<String>,

        /// Color value (e.g., Preto)
        #[arg(short, long)]
        color: Option<String>,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        #[arg(short, long)]
        product: i64,
        #[arg(short, long)]
        size: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Overwrite a line's quantity (0 removes it)
    SetQuantity {
        #[arg(short, long)]
        product: i64,
        #[arg(short, long)]
        size: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing, RUST_LOG overrides the default level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = vitrine_storefront::config::StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::product::show(&config, id).await?,
        },
        Commands::Shipping { action } => match action {
            ShippingAction::Estimate { cep } => {
                commands::shipping::estimate(&config, &cep).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&config)?,
            CartAction::Add { product, size, color, quantity } => {
                commands::cart::add(&config, product, size, color, quantity).await?;
            }
            CartAction::Remove { product, size, color } => {
                commands::cart::remove(&config, product, size, color)?;
            }
            CartAction::SetQuantity { product, size, color, quantity } => {
                commands::cart::set_quantity(&config, product, size, color, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&config)?,
        },
    }
    Ok(())
}
