//! Shopify → local inventory synchronization.
//!
//! Pages through the full Shopify catalog and upserts each product into
//! the local `inventory` table, matching rows by product name. The local
//! table then serves as the catalog fallback when Shopify is unreachable.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::db::{InventoryRepository, RepositoryError};
use crate::models::SyncedProduct;
use crate::shopify::types::{Product, ProductQuery};
use crate::shopify::{ShopifyError, StorefrontClient};

/// Page size for the full-catalog fetch.
const SYNC_PAGE_SIZE: i64 = 50;

/// Category assigned when a product has no product type.
const DEFAULT_CATEGORY: &str = "General";

/// Outcome of an inventory sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    /// Products fetched from Shopify.
    pub total_fetched: usize,
    /// Rows inserted.
    pub inserted: usize,
    /// Rows updated.
    pub updated: usize,
    /// Products that failed to upsert.
    pub errors: usize,
}

/// Errors that abort a sync run entirely.
///
/// Per-product upsert failures do not abort the run; they are tallied in
/// the summary instead.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The catalog fetch failed.
    #[error("shopify fetch failed: {0}")]
    Shopify(#[from] ShopifyError),
    /// The database was unavailable.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Fetch the entire catalog and upsert it into local inventory.
///
/// # Errors
///
/// Returns `SyncError` if a catalog page cannot be fetched. Individual
/// product failures only increment the error count.
#[instrument(skip(client, pool))]
pub async fn sync_inventory(
    client: &StorefrontClient,
    pool: &PgPool,
) -> Result<SyncSummary, SyncError> {
    let repo = InventoryRepository::new(pool);

    let mut all_products = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = client
            .get_products(&ProductQuery {
                first: Some(SYNC_PAGE_SIZE),
                after: after.clone(),
                ..Default::default()
            })
            .await?;

        info!(
            fetched = page.products.len(),
            total = all_products.len() + page.products.len(),
            "Fetched catalog page"
        );

        all_products.extend(page.products);

        if !page.page_info.has_next_page {
            break;
        }
        after = page.page_info.end_cursor;

        // A next page without a cursor would loop forever
        if after.is_none() {
            warn!("Page reported has_next_page without an end cursor, stopping");
            break;
        }
    }

    let total_fetched = all_products.len();
    let mut inserted = 0;
    let mut updated = 0;
    let mut errors = 0;

    for product in &all_products {
        let Some(synced) = to_synced_product(product) else {
            // Products without variants carry no price or stock
            continue;
        };

        match repo.upsert_synced(&synced).await {
            Ok(true) => inserted += 1,
            Ok(false) => updated += 1,
            Err(e) => {
                warn!(product = %product.title, error = %e, "Failed to upsert product");
                errors += 1;
            }
        }
    }

    let summary = SyncSummary {
        total_fetched,
        inserted,
        updated,
        errors,
    };

    info!(
        total = summary.total_fetched,
        inserted = summary.inserted,
        updated = summary.updated,
        errors = summary.errors,
        "Inventory sync completed"
    );

    Ok(summary)
}

/// Map a Shopify product to an inventory upsert, using its first variant
/// for price and stock. Returns `None` when the product has no variants.
fn to_synced_product(product: &Product) -> Option<SyncedProduct> {
    let variant = product.primary_variant()?;

    let price = variant.price.amount.parse::<Decimal>().unwrap_or_default();
    let stock = variant
        .quantity_available
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(0);

    Some(SyncedProduct {
        name: product.title.clone(),
        category: if product.product_type.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            product.product_type.clone()
        },
        description: Some(product.description.clone()).filter(|d| !d.is_empty()),
        price,
        stock,
        image: product.featured_image.as_ref().map(|i| i.url.clone()),
        tags: product.tags.clone(),
        shopify_product_id: product.id.clone(),
        shopify_variant_id: Some(variant.id.clone()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shopify::types::{Money, ProductVariant};

    fn product(title: &str, product_type: &str, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "test".to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            vendor: "Solara".to_string(),
            product_type: product_type.to_string(),
            tags: vec!["serum".to_string()],
            featured_image: None,
            images: vec![],
            variants,
        }
    }

    fn variant(qty: Option<i64>, price: &str) -> ProductVariant {
        ProductVariant {
            id: "gid://shopify/ProductVariant/1".to_string(),
            title: "Default Title".to_string(),
            available_for_sale: true,
            quantity_available: qty,
            price: Money {
                amount: price.to_string(),
                currency_code: "USD".to_string(),
            },
        }
    }

    #[test]
    fn test_synced_product_uses_first_variant() {
        let p = product("Serum", "Serums", vec![variant(Some(7), "24.50")]);
        let synced = to_synced_product(&p).unwrap();

        assert_eq!(synced.name, "Serum");
        assert_eq!(synced.category, "Serums");
        assert_eq!(synced.price, Decimal::new(2450, 2));
        assert_eq!(synced.stock, 7);
        assert_eq!(synced.tags, vec!["serum".to_string()]);
    }

    #[test]
    fn test_synced_product_defaults() {
        let p = product("Serum", "", vec![variant(None, "not-a-number")]);
        let synced = to_synced_product(&p).unwrap();

        assert_eq!(synced.category, DEFAULT_CATEGORY);
        assert_eq!(synced.stock, 0);
        assert_eq!(synced.price, Decimal::ZERO);
    }

    #[test]
    fn test_variantless_product_is_skipped() {
        let p = product("Serum", "Serums", vec![]);
        assert!(to_synced_product(&p).is_none());
    }
}
