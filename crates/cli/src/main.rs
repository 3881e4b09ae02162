//! Merch Shop CLI - browse the catalog, manage the cart and wishlist, and
//! place orders.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! merch products
//! merch product 5
//!
//! # Cart
//! merch cart add 5 --quantity 2
//! merch cart set 5 3
//! merch cart show
//!
//! # Wishlist
//! merch wishlist add 12
//! merch wishlist move 12
//!
//! # Orders
//! merch checkout --name "Asha Rao" --email asha@example.com --address "Hostel 4"
//! merch orders list
//! ```
//!
//! State is kept in `MERCH_DATA_DIR` (see [`config`]) and survives between
//! runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use merch_shop_core::{OrderId, ProductId};
use merch_shop_store::{Catalog, CheckoutForm, FileStorage, Persistence, Store};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod render;

use config::CliConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "merch")]
#[command(author, version, about = "Merch shop from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Products,
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Browse and remove past orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: ProductId,

        /// Units to add (default: 1)
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product id
        id: ProductId,

        /// New quantity; values below 1 or non-numbers become 1
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove everything from the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Save a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Move a product into the cart
    Move {
        /// Product id
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List,
    /// Show one order
    Show {
        /// Order id
        id: OrderId,
    },
    /// Delete an order from the history
    Remove {
        /// Order id
        id: OrderId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing on stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let store = Store::new();
    let persistence = Persistence::new(FileStorage::new(&config.data_dir))
        .with_keys(config.slice_keys());
    let task = persistence.attach(&store).await;

    let result = execute(cli.command, &store, Catalog::builtin(), &config);

    // The save loop exits once the last store handle is gone.
    drop(store);
    task.finish().await;
    result
}

fn execute(
    command: Commands,
    store: &Store,
    catalog: &Catalog,
    config: &CliConfig,
) -> Result<(), CliError> {
    match command {
        Commands::Products => commands::catalog::list(catalog, store),
        Commands::Product { id } => commands::catalog::show(catalog, store, id)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(store, &config.pricing),
            CartAction::Add { id, quantity } => {
                commands::cart::add(catalog, store, id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(store, id),
            CartAction::Set { id, quantity } => commands::cart::set(store, id, &quantity),
            CartAction::Clear => commands::cart::clear(store),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(store),
            WishlistAction::Add { id } => commands::wishlist::add(catalog, store, id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(store, id),
            WishlistAction::Move { id } => commands::wishlist::move_to_cart(store, id),
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(store),
            OrdersAction::Show { id } => commands::orders::show(store, id)?,
            OrdersAction::Remove { id } => commands::orders::remove(store, id),
        },
        Commands::Checkout {
            name,
            email,
            address,
        } => {
            let form = CheckoutForm {
                name,
                email,
                address,
            };
            commands::checkout::place(store, &config.pricing, &form)?;
        }
    }
    Ok(())
}
