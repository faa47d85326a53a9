//! Solara CLI - Database migrations and inventory management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! solara-cli migrate
//!
//! # Pull the Shopify catalog into local inventory
//! solara-cli sync inventory
//!
//! # Seed demo inventory rows
//! solara-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `sync inventory` - Sync the Shopify catalog into the inventory table
//! - `seed` - Seed the inventory with demo products

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "solara-cli")]
#[command(author, version, about = "Solara CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Sync data from Shopify
    Sync {
        #[command(subcommand)]
        target: SyncTarget,
    },
    /// Seed the database with demo data
    Seed,
}

#[derive(Subcommand)]
enum SyncTarget {
    /// Pull the full Shopify catalog into the inventory table
    Inventory,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solara_cli=info,solara_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Sync {
            target: SyncTarget::Inventory,
        } => commands::sync::inventory().await,
        Commands::Seed => commands::seed::run().await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("command failed: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
