//! Integration tests for Solara.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p solara-cli -- migrate
//!
//! # Start the storefront
//! cargo run -p solara-storefront
//!
//! # Run integration tests (ignored by default)
//! cargo test -p solara-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_products` - Catalog endpoints and inventory fallback
//! - `storefront_cart` - Cart flows (Shopify-linked and quick cart)
//! - `storefront_bookings` - Appointment booking flow

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store so the session persists
/// across requests, the way a browser would hold the cart.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
