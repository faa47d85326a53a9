//! Cache types for Storefront API responses.

use crate::shopify::types::{Collection, CollectionWithProducts, Product, ProductConnection};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
    Collections(Vec<Collection>),
    CollectionProducts(Box<CollectionWithProducts>),
}
