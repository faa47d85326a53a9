//! GraphQL documents for the Shopify Storefront API.
//!
//! Hand-written documents with typed `serde` responses in
//! [`super::wire`]. The cart selection set is shared by every cart
//! mutation so all of them return the same shape.

/// Fields selected for a full product.
const PRODUCT_FIELDS: &str = "
    id
    handle
    title
    vendor
    productType
    tags
    description
    featuredImage {
        url
        altText
    }
    images(first: 10) {
        edges {
            node {
                url
                altText
            }
        }
    }
    variants(first: 20) {
        edges {
            node {
                id
                title
                availableForSale
                quantityAvailable
                price {
                    amount
                    currencyCode
                }
            }
        }
    }
";

/// Fields selected for a cart in every cart query/mutation.
const CART_FIELDS: &str = "
    id
    checkoutUrl
    lines(first: 100) {
        edges {
            node {
                id
                quantity
                merchandise {
                    ... on ProductVariant {
                        id
                        title
                        product {
                            id
                            title
                            vendor
                            featuredImage {
                                url
                                altText
                            }
                        }
                        price {
                            amount
                            currencyCode
                        }
                    }
                }
            }
        }
    }
    cost {
        subtotalAmount {
            amount
            currencyCode
        }
        totalAmount {
            amount
            currencyCode
        }
    }
";

/// Paginated products, optionally filtered by a search query string.
#[must_use]
pub fn get_products(with_query: bool) -> String {
    let (params, args) = if with_query {
        (
            "$first: Int!, $after: String, $query: String!",
            "first: $first, after: $after, query: $query",
        )
    } else {
        ("$first: Int!, $after: String", "first: $first, after: $after")
    };

    format!(
        "query getProducts({params}) {{
            products({args}) {{
                edges {{
                    node {{ {PRODUCT_FIELDS} }}
                }}
                pageInfo {{
                    hasNextPage
                    endCursor
                }}
            }}
        }}"
    )
}

/// Single product lookup by handle.
#[must_use]
pub fn get_product_by_handle() -> String {
    format!(
        "query getProduct($handle: String!) {{
            productByHandle(handle: $handle) {{ {PRODUCT_FIELDS} }}
        }}"
    )
}

/// First 50 collections.
pub const GET_COLLECTIONS: &str = "
    query getCollections {
        collections(first: 50) {
            edges {
                node {
                    id
                    handle
                    title
                    description
                }
            }
        }
    }
";

/// A collection's products with pagination.
#[must_use]
pub fn get_collection_products() -> String {
    format!(
        "query getCollectionProducts($handle: String!, $first: Int!, $after: String) {{
            collectionByHandle(handle: $handle) {{
                id
                handle
                title
                description
                products(first: $first, after: $after) {{
                    edges {{
                        node {{ {PRODUCT_FIELDS} }}
                    }}
                    pageInfo {{
                        hasNextPage
                        endCursor
                    }}
                }}
            }}
        }}"
    )
}

/// Recommendations for a product.
pub const GET_RECOMMENDATIONS: &str = "
    query getRecommendedProducts($productId: ID!, $intent: ProductRecommendationIntent!) {
        productRecommendations(productId: $productId, intent: $intent) {
            id
            handle
            title
            vendor
            productType
            tags
            description
            featuredImage {
                url
                altText
            }
            variants(first: 1) {
                edges {
                    node {
                        id
                        title
                        availableForSale
                        quantityAvailable
                        price {
                            amount
                            currencyCode
                        }
                    }
                }
            }
        }
    }
";

/// Create a cart with optional initial lines.
#[must_use]
pub fn cart_create() -> String {
    format!(
        "mutation cartCreate($input: CartInput!) {{
            cartCreate(input: $input) {{
                cart {{ {CART_FIELDS} }}
                userErrors {{
                    field
                    message
                }}
            }}
        }}"
    )
}

/// Fetch an existing cart by ID.
#[must_use]
pub fn get_cart() -> String {
    format!(
        "query getCart($cartId: ID!) {{
            cart(id: $cartId) {{ {CART_FIELDS} }}
        }}"
    )
}

/// Add lines to a cart.
#[must_use]
pub fn cart_lines_add() -> String {
    format!(
        "mutation cartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {{
            cartLinesAdd(cartId: $cartId, lines: $lines) {{
                cart {{ {CART_FIELDS} }}
                userErrors {{
                    field
                    message
                }}
            }}
        }}"
    )
}

/// Update cart line quantities.
#[must_use]
pub fn cart_lines_update() -> String {
    format!(
        "mutation cartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {{
            cartLinesUpdate(cartId: $cartId, lines: $lines) {{
                cart {{ {CART_FIELDS} }}
                userErrors {{
                    field
                    message
                }}
            }}
        }}"
    )
}

/// Remove lines from a cart.
#[must_use]
pub fn cart_lines_remove() -> String {
    format!(
        "mutation cartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {{
            cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {{
                cart {{ {CART_FIELDS} }}
                userErrors {{
                    field
                    message
                }}
            }}
        }}"
    )
}

/// Minimal checkout creation: only the cart ID and checkout URL.
pub const CHECKOUT_CREATE: &str = "
    mutation cartCreate($input: CartInput!) {
        cartCreate(input: $input) {
            cart {
                id
                checkoutUrl
            }
            userErrors {
                field
                message
            }
        }
    }
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_document_with_and_without_query() {
        let with = get_products(true);
        assert!(with.contains("$query: String!"));
        assert!(with.contains("query: $query"));

        let without = get_products(false);
        assert!(!without.contains("$query"));
        assert!(without.contains("hasNextPage"));
    }

    #[test]
    fn test_cart_mutations_share_selection() {
        for doc in [cart_create(), cart_lines_add(), cart_lines_update(), cart_lines_remove()] {
            assert!(doc.contains("checkoutUrl"));
            assert!(doc.contains("userErrors"));
            assert!(doc.contains("subtotalAmount"));
        }
    }

    #[test]
    fn test_checkout_document_is_minimal() {
        assert!(CHECKOUT_CREATE.contains("checkoutUrl"));
        assert!(!CHECKOUT_CREATE.contains("lines(first: 100)"));
    }
}
