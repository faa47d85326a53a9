//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod sync;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("configuration error: {0}")]
    Config(#[from] solara_storefront::config::ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("sync error: {0}")]
    Sync(#[from] solara_storefront::services::inventory_sync::SyncError),
}
