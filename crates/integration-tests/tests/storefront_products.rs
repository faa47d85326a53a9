//! Integration tests for catalog endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront running (cargo run -p solara-storefront)
//! - Valid Shopify credentials in environment (or seeded inventory for
//!   the fallback assertions)
//!
//! Run with: cargo test -p solara-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use solara_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_products_listing_has_source() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to get products");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let source = body["source"].as_str().expect("source missing");
    assert!(source == "shopify" || source == "inventory");
    assert!(body["products"].is_array());

    // The degrade path must announce itself in Spanish
    if source == "inventory" {
        assert_eq!(body["notice"], "Mostrando inventario local");
    }
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_products_search_filters_listing() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products?q=serum"))
        .send()
        .await
        .expect("Failed to search products");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_product_is_404() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products/producto-que-no-existe"))
        .send()
        .await
        .expect("Failed to request product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No encontrado");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_categories_tree_contains_taxonomy() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/categories"))
        .send()
        .await
        .expect("Failed to get categories");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let categories = body["categories"].as_array().expect("categories missing");
    let slugs: Vec<&str> = categories
        .iter()
        .filter_map(|c| c["slug"].as_str())
        .collect();

    assert!(slugs.contains(&"skincare"));
    assert!(slugs.contains(&"makeup"));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_category_is_404() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/categories/categoria-fantasma"))
        .send()
        .await
        .expect("Failed to request category");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health_endpoints() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}
