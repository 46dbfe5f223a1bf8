//! Tanish Arts CLI - drive the storefront state from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (and sign in)
//! ta-cli signup asha --password secret
//!
//! # Shop
//! ta-cli cart add 2
//! ta-cli wishlist add 4
//! ta-cli cart buy-now 1
//! ta-cli cart checkout
//!
//! # Addresses
//! ta-cli address add --name "Asha Verma" --street "12 MI Road" --city Jaipur \
//!     --state Rajasthan --postal-code 302001 --default
//! ta-cli address list
//!
//! # Live location with a fixed position
//! ta-cli locate --lat 26.91 --lon 75.79 --city Jaipur
//!
//! # Everything at a glance
//! ta-cli status
//! ```
//!
//! State lives under `TANISH_DATA_DIR` (default `.tanish-arts`). Set
//! `RUST_LOG` to change what gets logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "ta-cli")]
#[command(author, version, about = "Tanish Arts storefront CLI")]
struct Cli {
    /// Directory holding the persisted state (overrides `TANISH_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON catalog file (overrides `TANISH_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign in to an existing account
    Login {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
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
    /// Manage saved addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Review a product
    Review {
        product: i32,
        /// Star rating, 1 to 5
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long, default_value = "")]
        comment: String,
        /// Reviewer name (defaults to the signed-in user)
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Fetch the live location from a fixed position
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Show the session, cart, wishlist and current address
    Status,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { product: i32 },
    /// Take a product out of the cart
    Remove { product: i32 },
    /// Replace the cart with one product and go to checkout
    BuyNow { product: i32 },
    /// Place the order for everything in the cart
    Checkout,
    /// List cart lines and the subtotal
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product
    Add { product: i32 },
    /// Remove a product
    Remove { product: i32 },
    /// List wished-for products
    Show,
}

#[derive(Subcommand)]
enum AddressAction {
    /// Save a new address
    Add(commands::address::NewAddress),
    /// Delete a saved address
    Delete { id: String },
    /// Make an address the default
    Default { id: String },
    /// Use an address for this checkout without changing the default
    Select { id: String },
    /// List saved addresses
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tanish_arts_storefront=info,ta_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut storefront = commands::open(cli.data_dir, cli.catalog)?;

    match cli.command {
        Commands::Signup { username, password } => {
            commands::account::sign_up(&mut storefront, &username, password.as_deref());
        }
        Commands::Login { username, password } => {
            commands::account::login(&mut storefront, &username, password.as_deref());
        }
        Commands::Logout => commands::account::logout(&mut storefront),
        Commands::Cart { action } => match action {
            CartAction::Add { product } => commands::cart::add(&mut storefront, product.into()),
            CartAction::Remove { product } => {
                commands::cart::remove(&mut storefront, product.into());
            }
            CartAction::BuyNow { product } => {
                commands::cart::buy_now(&mut storefront, product.into());
            }
            CartAction::Checkout => commands::cart::checkout(&mut storefront),
            CartAction::Show => commands::cart::show(&storefront),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product } => {
                commands::wishlist::add(&mut storefront, product.into());
            }
            WishlistAction::Remove { product } => {
                commands::wishlist::remove(&mut storefront, product.into());
            }
            WishlistAction::Show => commands::wishlist::show(&storefront),
        },
        Commands::Address { action } => match action {
            AddressAction::Add(address) => commands::address::add(&mut storefront, address),
            AddressAction::Delete { id } => commands::address::delete(&mut storefront, &id),
            AddressAction::Default { id } => commands::address::set_default(&mut storefront, &id),
            AddressAction::Select { id } => commands::address::select(&mut storefront, &id),
            AddressAction::List => commands::address::list(&storefront),
        },
        Commands::Review {
            product,
            rating,
            comment,
            author,
        } => commands::review::add(&mut storefront, product.into(), rating, comment, author),
        Commands::Locate { lat, lon, city } => {
            commands::location::locate(&mut storefront, lat, lon, city).await;
        }
        Commands::Status => commands::status::show(&storefront)?,
    }

    commands::report_notifications(&storefront);
    Ok(())
}
