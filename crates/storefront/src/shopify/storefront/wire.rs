//! Wire-format types for Storefront API responses.
//!
//! Shopify wraps lists in `edges`/`node` envelopes and uses camelCase
//! field names; these structs mirror that shape exactly and convert into
//! the flat domain types in [`crate::shopify::types`].

use serde::Deserialize;

use crate::shopify::types::{
    Cart, CartCost, CartLine, CartLineProduct, CartMerchandise, Collection,
    CollectionWithProducts, Image, Money, PageInfo, Product, ProductConnection, ProductVariant,
};

// =============================================================================
// Generic envelopes
// =============================================================================

/// An `edges` list wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<WirePageInfo>,
}

/// A single edge holding a node.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Unwrap the envelope into the inner nodes.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

/// Pagination info as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl From<Option<WirePageInfo>> for PageInfo {
    fn from(info: Option<WirePageInfo>) -> Self {
        info.map_or_else(Self::default, |p| Self {
            has_next_page: p.has_next_page,
            end_cursor: p.end_cursor,
        })
    }
}

// =============================================================================
// Catalog wire types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMoney {
    pub amount: String,
    pub currency_code: String,
}

impl From<WireMoney> for Money {
    fn from(m: WireMoney) -> Self {
        Self {
            amount: m.amount,
            currency_code: m.currency_code,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImage {
    pub url: String,
    pub alt_text: Option<String>,
}

impl From<WireImage> for Image {
    fn from(i: WireImage) -> Self {
        Self {
            url: i.url,
            alt_text: i.alt_text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    #[serde(default)]
    pub quantity_available: Option<i64>,
    pub price: WireMoney,
}

impl From<WireVariant> for ProductVariant {
    fn from(v: WireVariant) -> Self {
        Self {
            id: v.id,
            title: v.title,
            available_for_sale: v.available_for_sale,
            quantity_available: v.quantity_available,
            price: v.price.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub featured_image: Option<WireImage>,
    pub images: Option<Connection<WireImage>>,
    pub variants: Option<Connection<WireVariant>>,
}

impl From<WireProduct> for Product {
    fn from(p: WireProduct) -> Self {
        Self {
            id: p.id,
            handle: p.handle,
            title: p.title,
            description: p.description,
            vendor: p.vendor,
            product_type: p.product_type,
            tags: p.tags,
            featured_image: p.featured_image.map(Into::into),
            images: p
                .images
                .map(Connection::into_nodes)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            variants: p
                .variants
                .map(Connection::into_nodes)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<WireCollection> for Collection {
    fn from(c: WireCollection) -> Self {
        Self {
            id: c.id,
            handle: c.handle,
            title: c.title,
            description: c.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCollectionWithProducts {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub products: Connection<WireProduct>,
}

impl From<WireCollectionWithProducts> for CollectionWithProducts {
    fn from(c: WireCollectionWithProducts) -> Self {
        let page_info = c.products.page_info.clone().into();
        Self {
            collection: Collection {
                id: c.id,
                handle: c.handle,
                title: c.title,
                description: c.description,
            },
            products: c
                .products
                .into_nodes()
                .into_iter()
                .map(Into::into)
                .collect(),
            page_info,
        }
    }
}

// =============================================================================
// Cart wire types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCartLineProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    pub featured_image: Option<WireImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCartMerchandise {
    pub id: String,
    pub title: String,
    pub product: WireCartLineProduct,
    pub price: WireMoney,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: WireCartMerchandise,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCartCost {
    pub subtotal_amount: WireMoney,
    pub total_amount: WireMoney,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCart {
    pub id: String,
    pub checkout_url: String,
    pub lines: Connection<WireCartLine>,
    pub cost: WireCartCost,
}

impl From<WireCart> for Cart {
    fn from(c: WireCart) -> Self {
        Self {
            id: c.id,
            checkout_url: c.checkout_url,
            lines: c
                .lines
                .into_nodes()
                .into_iter()
                .map(|l| CartLine {
                    id: l.id,
                    quantity: l.quantity,
                    merchandise: CartMerchandise {
                        id: l.merchandise.id,
                        title: l.merchandise.title,
                        price: l.merchandise.price.into(),
                        product: CartLineProduct {
                            id: l.merchandise.product.id,
                            title: l.merchandise.product.title,
                            vendor: l.merchandise.product.vendor,
                            featured_image: l.merchandise.product.featured_image.map(Into::into),
                        },
                    },
                })
                .collect(),
            cost: CartCost {
                subtotal_amount: c.cost.subtotal_amount.into(),
                total_amount: c.cost.total_amount.into(),
            },
        }
    }
}

/// User error from a cart mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUserError {
    #[serde(default)]
    pub field: Option<serde_json::Value>,
    pub message: String,
}

/// Payload shared by every cart mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<WireCart>,
    #[serde(default = "Vec::new")]
    pub user_errors: Vec<WireUserError>,
}

// =============================================================================
// Response data roots
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    pub products: Connection<WireProduct>,
}

impl From<ProductsData> for ProductConnection {
    fn from(data: ProductsData) -> Self {
        let page_info = data.products.page_info.clone().into();
        Self {
            products: data
                .products
                .into_nodes()
                .into_iter()
                .map(Into::into)
                .collect(),
            page_info,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByHandleData {
    pub product_by_handle: Option<WireProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsData {
    pub collections: Connection<WireCollection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionByHandleData {
    pub collection_by_handle: Option<WireCollectionWithProducts>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsData {
    pub product_recommendations: Option<Vec<WireProduct>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartData {
    pub cart: Option<WireCart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

/// Cart shape for checkout creation (ID and URL only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCheckoutCart {
    pub id: String,
    pub checkout_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub cart: Option<WireCheckoutCart>,
    #[serde(default = "Vec::new")]
    pub user_errors: Vec<WireUserError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCreateData {
    pub cart_create: Option<CheckoutPayload>,
}
