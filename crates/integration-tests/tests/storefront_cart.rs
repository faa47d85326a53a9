//! Integration tests for cart flows.
//!
//! These tests require a running storefront with valid Shopify
//! credentials; cart mutations hit the live Storefront API.
//!
//! Run with: cargo test -p solara-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use solara_integration_tests::{session_client, storefront_base_url};

/// Fetch the first variant ID from the live catalog.
async fn first_variant_id(client: &reqwest::Client, base_url: &str) -> Option<String> {
    let body: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .ok()?
        .json()
        .await
        .ok()?;

    body["products"]
        .as_array()?
        .first()?
        .get("variants")?
        .as_array()?
        .first()?
        .get("id")?
        .as_str()
        .map(String::from)
}

#[tokio::test]
#[ignore = "Requires running storefront and Shopify credentials"]
async fn test_empty_cart_shape() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["item_count"], 0);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront and Shopify credentials"]
async fn test_add_then_count_uses_session() {
    let client = session_client();
    let base_url = storefront_base_url();

    let Some(variant_id) = first_variant_id(&client, &base_url).await else {
        // No live catalog; nothing to add
        return;
    };

    let resp = client
        .post(format!("{base_url}/cart/items"))
        .json(&json!({ "variant_id": variant_id, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Producto agregado");

    // Same session sees the count; the cart ID lives in the cookie
    let resp = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get count");
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["count"], 2);
}

#[tokio::test]
#[ignore = "Requires running storefront and Shopify credentials"]
async fn test_checkout_without_cart_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "El carrito está vacío");
}

#[tokio::test]
#[ignore = "Requires running storefront and Shopify credentials"]
async fn test_quick_cart_roundtrip() {
    let client = session_client();
    let base_url = storefront_base_url();

    // Quick cart starts empty
    let body: Value = client
        .get(format!("{base_url}/cart/quick"))
        .send()
        .await
        .expect("Failed to get quick cart")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["item_count"], 0);

    // Find a product handle to add
    let catalog: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to get products")
        .json()
        .await
        .expect("Failed to parse response");

    let Some(handle) = catalog["products"]
        .as_array()
        .and_then(|p| p.first())
        .and_then(|p| p["handle"].as_str())
    else {
        return;
    };

    let resp = client
        .post(format!("{base_url}/cart/quick/items"))
        .json(&json!({ "handle": handle }))
        .send()
        .await
        .expect("Failed to add to quick cart");
    assert_eq!(resp.status(), StatusCode::OK);

    // Checkout drains the quick cart and always yields a URL
    let body: Value = client
        .post(format!("{base_url}/cart/quick/checkout"))
        .send()
        .await
        .expect("Failed to checkout quick cart")
        .json()
        .await
        .expect("Failed to parse response");

    assert!(
        body["checkout_url"]
            .as_str()
            .is_some_and(|url| url.starts_with("https://"))
    );

    // The cart is empty afterwards
    let body: Value = client
        .get(format!("{base_url}/cart/quick"))
        .send()
        .await
        .expect("Failed to get quick cart")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["item_count"], 0);
}
