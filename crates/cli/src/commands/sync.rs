//! Inventory sync command.

use solara_storefront::config::StorefrontConfig;
use solara_storefront::db;
use solara_storefront::services::inventory_sync::sync_inventory;
use solara_storefront::shopify::StorefrontClient;

use super::CommandError;

/// Pull the full Shopify catalog into the local inventory table.
///
/// Uses the same configuration as the storefront service.
///
/// # Errors
///
/// Returns `CommandError` if configuration is invalid, the database is
/// unreachable, or the catalog fetch fails.
pub async fn inventory() -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    let client = StorefrontClient::new(&config.shopify);

    let summary = sync_inventory(&client, &pool).await?;

    tracing::info!(
        total = summary.total_fetched,
        inserted = summary.inserted,
        updated = summary.updated,
        errors = summary.errors,
        "Inventory sync finished"
    );

    Ok(())
}
