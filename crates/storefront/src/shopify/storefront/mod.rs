//! Shopify Storefront API client implementation.
//!
//! Sends hand-written GraphQL documents with `reqwest` and deserializes
//! typed responses via `serde`. Caches product and collection reads using
//! `moka` (5-minute TTL); cart and checkout calls are never cached.

mod cache;
pub mod documents;
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Cart, CartLineInput, CartLineUpdateInput, Collection, CollectionWithProducts, Product,
    ProductConnection, ProductQuery, RecommendationIntent,
};

use cache::CacheValue;
use wire::{
    CartCreateData, CartData, CartLinesAddData, CartLinesRemoveData, CartLinesUpdateData,
    CartMutationPayload, CheckoutCreateData, CollectionByHandleData, CollectionsData,
    ProductByHandleData, ProductsData, RecommendationsData, WireUserError,
};

/// Default page size for product listings.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// GraphQL response envelope.
#[derive(Debug, serde::Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides typed access to products, collections, cart, and checkout
/// operations. Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    checkout_fallback_url: String,
    cache: moka::future::Cache<String, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.graphql_endpoint(),
                access_token: config.token().to_string(),
                checkout_fallback_url: config.checkout_fallback_url.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e
                            .locations
                            .into_iter()
                            .map(|l| super::GraphQLErrorLocation {
                                line: l.line,
                                column: l.column,
                            })
                            .collect(),
                        path: e.path,
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![super::GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    /// Unwrap a cart mutation payload, surfacing user errors.
    fn unwrap_cart_payload(
        payload: Option<CartMutationPayload>,
        action: &str,
    ) -> Result<Cart, ShopifyError> {
        if let Some(result) = payload {
            if !result.user_errors.is_empty() {
                return Err(ShopifyError::UserError(join_user_errors(
                    result.user_errors,
                )));
            }

            if let Some(cart) = result.cart {
                return Ok(cart.into());
            }
        }

        Err(ShopifyError::GraphQL(vec![super::GraphQLError {
            message: format!("Failed to {action}"),
            locations: vec![],
            path: vec![],
        }]))
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a paginated list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ProductConnection, ShopifyError> {
        let filter = query.filter_expression();
        let first = query.first.unwrap_or(DEFAULT_PAGE_SIZE);
        let cache_key = format!(
            "products:{}:{}",
            query.after.as_deref().unwrap_or(""),
            filter.as_deref().unwrap_or("")
        );

        // Check cache (only for unfiltered listings)
        if filter.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let document = documents::get_products(filter.is_some());
        let mut variables = json!({
            "first": first,
            "after": query.after,
        });
        if let Some(ref filter) = filter {
            variables["query"] = json!(filter);
        }

        let data: ProductsData = self.execute(&document, variables).await?;
        let connection = ProductConnection::from(data);

        // Cache if not a filtered query
        if filter.is_none() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(connection.clone()))
                .await;
        }

        Ok(connection)
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = format!("product:{handle}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let data: ProductByHandleData = self
            .execute(
                &documents::get_product_by_handle(),
                json!({ "handle": handle }),
            )
            .await?;

        let product: Product = data
            .product_by_handle
            .map(Into::into)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get product recommendations.
    ///
    /// Missing data degrades to an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_recommendations(
        &self,
        product_id: &str,
        intent: RecommendationIntent,
    ) -> Result<Vec<Product>, ShopifyError> {
        let data: RecommendationsData = self
            .execute(
                documents::GET_RECOMMENDATIONS,
                json!({
                    "productId": product_id,
                    "intent": intent.as_graphql(),
                }),
            )
            .await?;

        Ok(data
            .product_recommendations
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the first 50 collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        let cache_key = "collections".to_string();

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data: CollectionsData = self
            .execute(documents::GET_COLLECTIONS, json!({}))
            .await?;

        let collections: Vec<Collection> = data
            .collections
            .into_nodes()
            .into_iter()
            .map(Into::into)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    /// Get a collection and a page of its products.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not found or the request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        first: Option<i64>,
        after: Option<String>,
    ) -> Result<CollectionWithProducts, ShopifyError> {
        let cache_key = format!("collection:{handle}:{}", after.as_deref().unwrap_or(""));

        if let Some(CacheValue::CollectionProducts(collection)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let data: CollectionByHandleData = self
            .execute(
                &documents::get_collection_products(),
                json!({
                    "handle": handle,
                    "first": first.unwrap_or(DEFAULT_PAGE_SIZE),
                    "after": after,
                }),
            )
            .await?;

        let collection: CollectionWithProducts = data
            .collection_by_handle
            .map(Into::into)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::CollectionProducts(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let data: CartCreateData = self
            .execute(
                &documents::cart_create(),
                json!({ "input": { "lines": lines } }),
            )
            .await?;

        Self::unwrap_cart_payload(data.cart_create, "create cart")
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if the cart has expired or never
    /// existed; callers treat that as a stale stored ID.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, ShopifyError> {
        let data: CartData = self
            .execute(&documents::get_cart(), json!({ "cartId": cart_id }))
            .await?;

        data.cart
            .map(Into::into)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let data: CartLinesAddData = self
            .execute(
                &documents::cart_lines_add(),
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        Self::unwrap_cart_payload(data.cart_lines_add, "add to cart")
    }

    /// Update cart line quantities.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &str,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let data: CartLinesUpdateData = self
            .execute(
                &documents::cart_lines_update(),
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;

        Self::unwrap_cart_payload(data.cart_lines_update, "update cart")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let data: CartLinesRemoveData = self
            .execute(
                &documents::cart_lines_remove(),
                json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;

        Self::unwrap_cart_payload(data.cart_lines_remove, "remove from cart")
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Create a checkout for the given lines and return its URL.
    ///
    /// Any failure falls back to the configured static cart URL so the
    /// buyer always gets somewhere to pay.
    #[instrument(skip(self, lines))]
    pub async fn create_checkout(&self, lines: Vec<CartLineInput>) -> String {
        match self.try_create_checkout(lines).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Checkout creation failed, using fallback cart URL: {e}");
                self.inner.checkout_fallback_url.clone()
            }
        }
    }

    /// Create a checkout, propagating failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails, returns user errors, or
    /// omits the checkout URL.
    pub async fn try_create_checkout(
        &self,
        lines: Vec<CartLineInput>,
    ) -> Result<String, ShopifyError> {
        let data: CheckoutCreateData = self
            .execute(
                documents::CHECKOUT_CREATE,
                json!({ "input": { "lines": lines } }),
            )
            .await?;

        if let Some(payload) = data.cart_create {
            if !payload.user_errors.is_empty() {
                return Err(ShopifyError::UserError(join_user_errors(
                    payload.user_errors,
                )));
            }

            if let Some(cart) = payload.cart {
                return Ok(cart.checkout_url);
            }
        }

        Err(ShopifyError::GraphQL(vec![super::GraphQLError {
            message: "Failed to create checkout".to_string(),
            locations: vec![],
            path: vec![],
        }]))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, handle: &str) {
        self.inner
            .cache
            .invalidate(&format!("product:{handle}"))
            .await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Join mutation user errors into a single message.
fn join_user_errors(errors: Vec<WireUserError>) -> String {
    errors
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}
