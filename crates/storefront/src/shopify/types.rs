//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! envelopes (`edges`/`node` connections) the API returns. Fields mirror
//! what the storefront actually selects; Shopify exposes far more.

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Parse into a typed [`solara_core::Money`] for arithmetic/display.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a decimal or the currency is
    /// unsupported.
    pub fn to_core(&self) -> Result<solara_core::Money, solara_core::money::MoneyError> {
        solara_core::Money::parse(&self.amount, &self.currency_code)
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product variant (specific combination of options).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID (`gid://shopify/ProductVariant/...`).
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Quantity available (if inventory tracking enabled).
    pub quantity_available: Option<i64>,
    /// Current price.
    pub price: Money,
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (`gid://shopify/Product/...`).
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Vendor (brand) name.
    pub vendor: String,
    /// Product type/category as set in Shopify admin.
    pub product_type: String,
    /// Product tags.
    pub tags: Vec<String>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images.
    pub images: Vec<Image>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// The first variant, which carries the display price and availability.
    #[must_use]
    pub fn primary_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    /// Whether any variant is purchasable.
    #[must_use]
    pub fn available_for_sale(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
}

/// A collection together with a page of its products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionWithProducts {
    /// The collection itself.
    pub collection: Collection,
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Paginated list of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Parameters for a product listing query.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Page size (defaults to 20 server-side).
    pub first: Option<i64>,
    /// Cursor to continue after.
    pub after: Option<String>,
    /// Title search term.
    pub search: Option<String>,
    /// Vendor (brand) filter.
    pub vendor: Option<String>,
    /// Product type filter.
    pub product_type: Option<String>,
    /// Tag filters (any-of).
    pub tags: Vec<String>,
}

impl ProductQuery {
    /// Build the Shopify search query string from the active filters.
    ///
    /// Filters combine with `AND`; multiple tags expand to an `OR` group,
    /// mirroring the Storefront API search syntax.
    #[must_use]
    pub fn filter_expression(&self) -> Option<String> {
        let mut filters = Vec::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            filters.push(format!("title:*{search}*"));
        }
        if let Some(vendor) = self.vendor.as_deref().filter(|s| !s.is_empty()) {
            filters.push(format!("vendor:{vendor}"));
        }
        if let Some(product_type) = self.product_type.as_deref().filter(|s| !s.is_empty()) {
            filters.push(format!("product_type:{product_type}"));
        }
        if !self.tags.is_empty() {
            filters.push(format!("tag:{}", self.tags.join(" OR tag:")));
        }

        if filters.is_empty() {
            None
        } else {
            Some(filters.join(" AND "))
        }
    }
}

/// Intent for product recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationIntent {
    /// Related products.
    #[default]
    Related,
    /// Complementary products.
    Complementary,
}

impl RecommendationIntent {
    /// The GraphQL enum value.
    #[must_use]
    pub const fn as_graphql(&self) -> &'static str {
        match self {
            Self::Related => "RELATED",
            Self::Complementary => "COMPLEMENTARY",
        }
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Parent product info for a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineProduct {
    /// Product ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Vendor.
    pub vendor: String,
    /// Featured image.
    pub featured_image: Option<Image>,
}

/// Merchandise in a cart line (the selected product variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Current price.
    pub price: Money,
    /// Parent product info.
    pub product: CartLineProduct,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: String,
    /// Quantity.
    pub quantity: i64,
    /// Product variant.
    pub merchandise: CartMerchandise,
}

/// Cart cost summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    pub subtotal_amount: Money,
    /// Total amount.
    pub total_amount: Money,
}

/// A remote shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID (`gid://shopify/Cart/...`).
    pub id: String,
    /// Checkout URL.
    pub checkout_url: String,
    /// Cart lines.
    pub lines: Vec<CartLine>,
    /// Cart cost summary.
    pub cost: CartCost,
}

impl Cart {
    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Input for adding a line to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_expression_empty() {
        assert_eq!(ProductQuery::default().filter_expression(), None);
    }

    #[test]
    fn test_filter_expression_search_only() {
        let query = ProductQuery {
            search: Some("serum".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.filter_expression(),
            Some("title:*serum*".to_string())
        );
    }

    #[test]
    fn test_filter_expression_combines_with_and() {
        let query = ProductQuery {
            search: Some("crema".to_string()),
            vendor: Some("Beauty of Joseon".to_string()),
            product_type: Some("Moisturizer".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.filter_expression(),
            Some(
                "title:*crema* AND vendor:Beauty of Joseon AND product_type:Moisturizer"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_filter_expression_tags_expand_to_or() {
        let query = ProductQuery {
            tags: vec!["sunscreen".to_string(), "spf".to_string()],
            ..Default::default()
        };
        assert_eq!(
            query.filter_expression(),
            Some("tag:sunscreen OR tag:spf".to_string())
        );
    }

    #[test]
    fn test_filter_expression_ignores_blank_values() {
        let query = ProductQuery {
            search: Some(String::new()),
            vendor: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.filter_expression(), None);
    }

    #[test]
    fn test_cart_total_quantity() {
        let line = |qty: i64| CartLine {
            id: format!("line-{qty}"),
            quantity: qty,
            merchandise: CartMerchandise {
                id: "v1".to_string(),
                title: "Default".to_string(),
                price: Money {
                    amount: "10.00".to_string(),
                    currency_code: "USD".to_string(),
                },
                product: CartLineProduct {
                    id: "p1".to_string(),
                    title: "Producto".to_string(),
                    vendor: "Solara".to_string(),
                    featured_image: None,
                },
            },
        };

        let cart = Cart {
            id: "gid://shopify/Cart/1".to_string(),
            checkout_url: "https://checkout".to_string(),
            lines: vec![line(2), line(3)],
            cost: CartCost {
                subtotal_amount: Money {
                    amount: "50.00".to_string(),
                    currency_code: "USD".to_string(),
                },
                total_amount: Money {
                    amount: "50.00".to_string(),
                    currency_code: "USD".to_string(),
                },
            },
        };

        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_recommendation_intent_graphql_values() {
        assert_eq!(RecommendationIntent::Related.as_graphql(), "RELATED");
        assert_eq!(
            RecommendationIntent::Complementary.as_graphql(),
            "COMPLEMENTARY"
        );
    }
}
