//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /products               - Product listing (inventory fallback)
//! GET  /products/{handle}      - Product detail
//! GET  /products/{handle}/recommendations - Related/complementary products
//! GET  /collections            - Collection listing
//! GET  /collections/{handle}   - Collection products
//! GET  /categories             - Curated taxonomy tree
//! GET  /categories/{category}  - Products claimed by a category
//! GET  /categories/{category}/{subcategory} - Products claimed by a subcategory
//!
//! # Cart (Shopify-linked, cart ID in session)
//! GET    /cart                 - Current cart
//! POST   /cart/items           - Add item (creates cart on first add)
//! PATCH  /cart/items           - Update line quantity (0 removes)
//! DELETE /cart/items           - Remove line
//! DELETE /cart                 - Forget the cart
//! GET    /cart/count           - Item count badge
//!
//! # Quick cart (session-held line items, no remote cart until checkout)
//! GET    /cart/quick           - Current quick cart
//! POST   /cart/quick/items     - Add item by product handle
//! PATCH  /cart/quick/items     - Update quantity (0 removes)
//! DELETE /cart/quick/items     - Remove item
//! DELETE /cart/quick           - Empty the quick cart
//! POST   /cart/quick/checkout  - Create checkout from quick cart
//!
//! # Checkout
//! POST /checkout               - Checkout URL for the Shopify-linked cart
//! POST /checkout/buy-now       - Single-item checkout
//!
//! # Bookings
//! GET  /bookings/slots         - Available dates and times
//! POST /bookings               - Book a facial-scanner appointment
//! GET  /bookings?email=        - A customer's appointments
//!
//! # Account
//! GET  /account/{email}        - Profile + appointments + orders + scans
//!
//! # Sync
//! POST /sync/inventory         - Pull the Shopify catalog into inventory
//! ```

pub mod account;
pub mod bookings;
pub mod cart;
pub mod categories;
pub mod collections;
pub mod products;
pub mod sync;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::booking_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
        .route("/{handle}/recommendations", get(products::recommendations))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{category}", get(categories::show_category))
        .route(
            "/{category}/{subcategory}",
            get(categories::show_subcategory),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route(
            "/items",
            post(cart::add).patch(cart::update).delete(cart::remove),
        )
        .route("/count", get(cart::count))
        // Quick cart: line items live in the session, not in Shopify
        .route("/quick", get(cart::quick_show).delete(cart::quick_clear))
        .route(
            "/quick/items",
            post(cart::quick_add)
                .patch(cart::quick_update)
                .delete(cart::quick_remove),
        )
        .route("/quick/checkout", post(cart::quick_checkout))
}

/// Create the booking routes router (rate limited).
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create).get(bookings::index))
        .route("/slots", get(bookings::slots))
        .layer(booking_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .nest("/categories", category_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/checkout/buy-now", post(cart::buy_now))
        .nest("/bookings", booking_routes())
        .route("/account/{email}", get(account::show))
        .route("/sync/inventory", post(sync::inventory))
}
