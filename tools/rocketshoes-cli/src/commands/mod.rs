//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};
use rocketshoes_commerce::ProductId;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents and total
    Show,

    /// Add one unit of a product
    Add {
        /// Product ID.
        product_id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID.
        product_id: ProductId,
    },

    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID.
        product_id: ProductId,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Empty the cart
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new config file
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}
