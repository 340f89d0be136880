//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart lines and totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: u64,
        /// Product title.
        #[arg(long)]
        title: String,
        /// Unit price (e.g., 19.99).
        #[arg(long)]
        price: String,
        /// Image URL.
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: u64,
    },
    /// Set a product's quantity (0 or less removes it).
    Set {
        /// Product ID.
        id: u64,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,

    /// Catalog JSON file (default: from config).
    #[arg(short, long, global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only show this category ("all" for every product).
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// List categories.
    Categories,
    /// Add a catalog product to the cart.
    Add {
        /// Product ID.
        id: u64,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name.
    #[arg(long)]
    pub full_name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Street address.
    #[arg(long)]
    pub address: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// ZIP code.
    #[arg(long)]
    pub zip_code: Option<String>,

    /// Name on card.
    #[arg(long)]
    pub card_name: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// Expiry month.
    #[arg(long)]
    pub exp_month: Option<String>,

    /// Expiry year.
    #[arg(long)]
    pub exp_year: Option<String>,

    /// Card security code.
    #[arg(long)]
    pub cvv: Option<String>,

    /// Read the form from a JSON file (field names as in the form, e.g. "zipCode").
    #[arg(long)]
    pub form: Option<String>,

    /// Don't prompt; fail if fields are missing.
    #[arg(short, long)]
    pub yes: bool,

    /// Empty the cart after the order is placed.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
