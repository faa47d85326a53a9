//! Category route handlers.
//!
//! Serves the curated taxonomy and filters the catalog through the
//! tag-matching heuristic. Listings reuse the products handler's
//! inventory fallback so category pages degrade the same way.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::catalog::{
    CATEGORIES, Category, FEATURED_CATEGORIES, FeaturedCategory, ProductFilter, Subcategory,
    find_category, find_subcategory,
};
use crate::db::InventoryRepository;
use crate::error::{AppError, Result};
use crate::routes::products::{CatalogSource, inventory_products};
use crate::shopify::types::{Product, ProductQuery};
use crate::state::AppState;

/// The taxonomy tree response.
#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: &'static [Category],
    pub featured: &'static [FeaturedCategory],
}

/// The curated taxonomy.
#[instrument]
pub async fn index() -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        categories: CATEGORIES,
        featured: FEATURED_CATEGORIES,
    })
}

/// Query parameters for category listings.
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    /// Search term across title/description/vendor.
    pub q: Option<String>,
    /// Brand filter.
    pub brand: Option<String>,
    /// Minimum price in COP.
    pub min_price: Option<Decimal>,
    /// Maximum price in COP.
    pub max_price: Option<Decimal>,
}

/// A filtered category listing.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<&'static str>,
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

/// Products claimed by a category.
#[instrument(skip(state), fields(category = %category))]
pub async fn show_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<CategoryResponse>> {
    let category = find_category(&category)
        .ok_or_else(|| AppError::NotFound(format!("category: {category}")))?;

    let (products, source) = fetch_catalog(&state).await?;
    let filter = build_filter(params, Some(category), None);

    Ok(Json(CategoryResponse {
        category: category.slug,
        subcategory: None,
        products: filter.apply(products),
        source,
    }))
}

/// Products claimed by a subcategory.
#[instrument(skip(state), fields(category = %category, subcategory = %subcategory))]
pub async fn show_subcategory(
    State(state): State<AppState>,
    Path((category, subcategory)): Path<(String, String)>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<CategoryResponse>> {
    let category = find_category(&category)
        .ok_or_else(|| AppError::NotFound(format!("category: {category}")))?;
    let subcategory = find_subcategory(category, &subcategory)
        .ok_or_else(|| AppError::NotFound(format!("subcategory: {subcategory}")))?;

    let (products, source) = fetch_catalog(&state).await?;
    let filter = build_filter(params, None, Some(subcategory));

    Ok(Json(CategoryResponse {
        category: category.slug,
        subcategory: Some(subcategory.slug),
        products: filter.apply(products),
        source,
    }))
}

/// Fetch the full (first page) catalog with the inventory fallback.
async fn fetch_catalog(state: &AppState) -> Result<(Vec<Product>, CatalogSource)> {
    match state
        .storefront()
        .get_products(&ProductQuery::default())
        .await
    {
        Ok(connection) if !connection.products.is_empty() => {
            Ok((connection.products, CatalogSource::Shopify))
        }
        Ok(_) => {
            warn!("Shopify returned an empty catalog, filtering local inventory");
            let items = InventoryRepository::new(state.pool()).list().await?;
            Ok((inventory_products(&items), CatalogSource::Inventory))
        }
        Err(e) => {
            warn!("Shopify catalog fetch failed, filtering local inventory: {e}");
            let items = InventoryRepository::new(state.pool()).list().await?;
            Ok((inventory_products(&items), CatalogSource::Inventory))
        }
    }
}

fn build_filter(
    params: CategoryParams,
    category: Option<&'static Category>,
    subcategory: Option<&'static Subcategory>,
) -> ProductFilter {
    ProductFilter {
        search: params.q,
        brand: params.brand,
        category,
        subcategory,
        min_price: params.min_price,
        max_price: params.max_price,
    }
}
