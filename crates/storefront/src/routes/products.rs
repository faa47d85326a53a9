//! Product route handlers.
//!
//! Listings come from Shopify; when Shopify fails or returns an empty
//! catalog the handlers degrade to the local inventory table so the shop
//! never shows a blank page.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::db::InventoryRepository;
use crate::error::Result;
use crate::models::InventoryItem;
use crate::shopify::types::{
    Image, Money, PageInfo, Product, ProductQuery, ProductVariant, RecommendationIntent,
};
use crate::state::AppState;

/// Vendor assigned to inventory-fallback products.
const HOUSE_VENDOR: &str = "Solara";

/// Where a product listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Shopify,
    Inventory,
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsParams {
    /// Title search term.
    pub q: Option<String>,
    /// Vendor (brand) filter.
    pub vendor: Option<String>,
    /// Product type filter.
    pub product_type: Option<String>,
    /// Comma-separated tag filters (any-of).
    pub tags: Option<String>,
    /// Page size.
    pub first: Option<i64>,
    /// Cursor to continue after.
    pub after: Option<String>,
}

/// A product listing response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
    pub source: CatalogSource,
    /// Customer-facing notice when the listing degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<ProductsParams> for ProductQuery {
    fn from(params: ProductsParams) -> Self {
        Self {
            first: params.first,
            after: params.after,
            search: params.q,
            vendor: params.vendor,
            product_type: params.product_type,
            tags: params
                .tags
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// List products, falling back to local inventory when Shopify fails or
/// has nothing to show.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> Result<Json<ProductsResponse>> {
    let query = ProductQuery::from(params);

    match state.storefront().get_products(&query).await {
        Ok(connection) if !connection.products.is_empty() => Ok(Json(ProductsResponse {
            products: connection.products,
            page_info: connection.page_info,
            source: CatalogSource::Shopify,
            notice: None,
        })),
        Ok(_) => {
            warn!("Shopify returned an empty catalog, serving local inventory");
            inventory_fallback(&state).await
        }
        Err(e) => {
            warn!("Shopify catalog fetch failed, serving local inventory: {e}");
            inventory_fallback(&state).await
        }
    }
}

/// Serve the local inventory table as a product listing.
async fn inventory_fallback(state: &AppState) -> Result<Json<ProductsResponse>> {
    let items = InventoryRepository::new(state.pool()).list().await?;

    Ok(Json(ProductsResponse {
        products: inventory_products(&items),
        page_info: PageInfo::default(),
        source: CatalogSource::Inventory,
        notice: Some("Mostrando inventario local".to_string()),
    }))
}

/// Map inventory rows to the product shape the catalog serves.
pub(crate) fn inventory_products(items: &[InventoryItem]) -> Vec<Product> {
    items.iter().map(inventory_product).collect()
}

/// Map an inventory row to the product shape the catalog serves.
fn inventory_product(item: &InventoryItem) -> Product {
    Product {
        id: item.id.to_string(),
        handle: slugify(&item.name),
        title: item.name.clone(),
        description: item.description.clone().unwrap_or_default(),
        vendor: item
            .brand
            .clone()
            .unwrap_or_else(|| HOUSE_VENDOR.to_string()),
        product_type: item.category.clone(),
        tags: item.skin_types.clone().unwrap_or_default(),
        featured_image: item.image.as_ref().map(|url| Image {
            url: url.clone(),
            alt_text: Some(item.name.clone()),
        }),
        images: item
            .image
            .as_ref()
            .map(|url| {
                vec![Image {
                    url: url.clone(),
                    alt_text: Some(item.name.clone()),
                }]
            })
            .unwrap_or_default(),
        variants: vec![ProductVariant {
            id: item.id.to_string(),
            title: "Default".to_string(),
            available_for_sale: item.stock > 0,
            quantity_available: Some(i64::from(item.stock)),
            price: Money {
                amount: item.price.to_string(),
                currency_code: "COP".to_string(),
            },
        }],
    }
}

/// Lowercase the name and join words with dashes.
fn slugify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Product detail by handle.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Product>> {
    let product = state.storefront().get_product_by_handle(&handle).await?;
    Ok(Json(product))
}

/// Query parameters for recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendationsParams {
    #[serde(default)]
    pub intent: RecommendationIntent,
}

/// Related or complementary products for a product.
///
/// Degrades to an empty list when the lookup fails.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<RecommendationsParams>,
) -> Result<Json<Vec<Product>>> {
    let product = state.storefront().get_product_by_handle(&handle).await?;

    match state
        .storefront()
        .get_recommendations(&product.id, params.intent)
        .await
    {
        Ok(products) => Ok(Json(products)),
        Err(e) => {
            warn!("Recommendations fetch failed, returning empty list: {e}");
            Ok(Json(Vec::new()))
        }
    }
}
