//! Cart and checkout route handlers.
//!
//! Two cart flavors, both keyed off the session:
//!
//! - The Shopify-linked cart: only its ID lives in the session; every read
//!   refetches the cart from Shopify. A vanished remote cart clears the
//!   stored ID and presents an empty cart.
//! - The quick cart: line items serialized into the session, no remote
//!   cart at all until checkout drains it into `cartCreate`.
//!
//! Concurrent mutations are last-write-wins: two rapid quantity updates
//! may interleave and the later Shopify write sticks. No ordering is
//! guaranteed between in-flight cart calls.

use axum::{
    Json,
    extract::State,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::cart::LocalCart;
use crate::error::{AppError, Result};
use crate::shopify::types::{Cart as ShopifyCart, CartLineInput, CartLineUpdateInput, Money};
use crate::state::AppState;

/// Session key holding the Shopify cart ID.
const CART_ID_KEY: &str = "cart_id";

/// Session key holding the serialized quick cart.
const QUICK_CART_KEY: &str = "quick_cart";

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub line_id: String,
    pub variant_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_title: Option<String>,
    pub vendor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: i64,
    /// Unit price formatted in COP.
    pub price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub items: Vec<CartItemView>,
    pub item_count: i64,
    /// Subtotal formatted in COP.
    pub subtotal: String,
    /// Total formatted in COP.
    pub total: String,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            item_count: 0,
            subtotal: "$ 0".to_string(),
            total: "$ 0".to_string(),
        }
    }
}

/// Format a Shopify money value in COP for display.
fn format_price(money: &Money) -> String {
    money
        .to_core()
        .map_or_else(|_| format!("$ {}", money.amount), |m| m.display_cop())
}

impl From<&ShopifyCart> for CartView {
    fn from(cart: &ShopifyCart) -> Self {
        Self {
            id: Some(cart.id.clone()),
            items: cart
                .lines
                .iter()
                .map(|line| CartItemView {
                    line_id: line.id.clone(),
                    variant_id: line.merchandise.id.clone(),
                    title: line.merchandise.product.title.clone(),
                    variant_title: if line.merchandise.title == "Default Title" {
                        None
                    } else {
                        Some(line.merchandise.title.clone())
                    },
                    vendor: line.merchandise.product.vendor.clone(),
                    image: line
                        .merchandise
                        .product
                        .featured_image
                        .as_ref()
                        .map(|i| i.url.clone()),
                    quantity: line.quantity,
                    price: format_price(&line.merchandise.price),
                })
                .collect(),
            item_count: cart.total_quantity(),
            subtotal: format_price(&cart.cost.subtotal_amount),
            total: format_price(&cart.cost.total_amount),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the Shopify cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<String> {
    session.get::<String>(CART_ID_KEY).await.ok().flatten()
}

/// Set the Shopify cart ID in the session.
async fn set_cart_id(session: &Session, cart_id: &str) {
    if let Err(e) = session.insert(CART_ID_KEY, cart_id).await {
        tracing::error!("Failed to save cart ID to session: {e}");
    }
}

/// Forget the Shopify cart ID.
async fn clear_cart_id(session: &Session) {
    if let Err(e) = session.remove::<String>(CART_ID_KEY).await {
        tracing::error!("Failed to clear cart ID from session: {e}");
    }
}

/// Load the quick cart from the session, defaulting to empty.
async fn load_quick_cart(session: &Session) -> LocalCart {
    session
        .get::<LocalCart>(QUICK_CART_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the quick cart to the session.
async fn save_quick_cart(session: &Session, cart: &LocalCart) {
    if let Err(e) = session.insert(QUICK_CART_KEY, cart).await {
        tracing::error!("Failed to save quick cart to session: {e}");
    }
}

// =============================================================================
// Shopify-linked Cart
// =============================================================================

/// Show the current cart.
///
/// A stale or failed cart fetch degrades to an empty cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CartView> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Json(CartView::empty());
    };

    match state.storefront().get_cart(&cart_id).await {
        Ok(cart) => Json(CartView::from(&cart)),
        Err(crate::shopify::ShopifyError::NotFound(_)) => {
            // Cart expired on Shopify's side; forget the stored ID
            clear_cart_id(&session).await;
            Json(CartView::empty())
        }
        Err(e) => {
            warn!("Failed to fetch cart {cart_id}: {e}");
            Json(CartView::empty())
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub variant_id: String,
    pub quantity: Option<u32>,
}

/// Add an item, creating the remote cart on first add.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<Value>> {
    let line = CartLineInput {
        merchandise_id: body.variant_id,
        quantity: i64::from(body.quantity.unwrap_or(1)),
    };

    let cart = match get_cart_id(&session).await {
        Some(cart_id) => {
            state
                .storefront()
                .add_to_cart(&cart_id, vec![line])
                .await?
        }
        None => state.storefront().create_cart(vec![line]).await?,
    };

    set_cart_id(&session, &cart.id).await;

    Ok(Json(json!({
        "message": "Producto agregado",
        "cart": CartView::from(&cart),
    })))
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub line_id: String,
    pub quantity: u32,
}

/// Update a line's quantity; zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<Value>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Ok(Json(json!({ "cart": CartView::empty() })));
    };

    let cart = if body.quantity == 0 {
        state
            .storefront()
            .remove_from_cart(&cart_id, vec![body.line_id])
            .await?
    } else {
        state
            .storefront()
            .update_cart_lines(
                &cart_id,
                vec![CartLineUpdateInput {
                    id: body.line_id,
                    quantity: i64::from(body.quantity),
                }],
            )
            .await?
    };

    Ok(Json(json!({
        "message": "Carrito actualizado",
        "cart": CartView::from(&cart),
    })))
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub line_id: String,
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RemoveFromCartRequest>,
) -> Result<Json<Value>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Ok(Json(json!({ "cart": CartView::empty() })));
    };

    let cart = state
        .storefront()
        .remove_from_cart(&cart_id, vec![body.line_id])
        .await?;

    Ok(Json(json!({
        "message": "Producto eliminado",
        "cart": CartView::from(&cart),
    })))
}

/// Forget the cart entirely.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<Value> {
    clear_cart_id(&session).await;

    Json(json!({
        "message": "Carrito vaciado",
        "cart": CartView::empty(),
    }))
}

/// Item count for the cart badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Json<Value> {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state
            .storefront()
            .get_cart(&cart_id)
            .await
            .map(|cart| cart.total_quantity())
            .unwrap_or(0),
        None => 0,
    };

    Json(json!({ "count": count }))
}

// =============================================================================
// Checkout
// =============================================================================

/// Checkout URL for the Shopify-linked cart.
///
/// A failed cart fetch falls back to the static cart URL so the buyer
/// always gets somewhere to pay.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Json<Value>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Err(AppError::BadRequest(
            "El carrito está vacío".to_string(),
        ));
    };

    let checkout_url = match state.storefront().get_cart(&cart_id).await {
        Ok(cart) => cart.checkout_url,
        Err(e) => {
            warn!("Failed to fetch cart for checkout, using fallback URL: {e}");
            state.config().shopify.checkout_fallback_url.clone()
        }
    };

    Ok(Json(json!({
        "checkout_url": checkout_url,
        "message": "Redirigiendo a checkout",
    })))
}

/// Buy-now request body.
#[derive(Debug, Deserialize)]
pub struct BuyNowRequest {
    pub variant_id: String,
    pub quantity: Option<u32>,
}

/// Single-item checkout that bypasses both carts.
#[instrument(skip(state))]
pub async fn buy_now(
    State(state): State<AppState>,
    Json(body): Json<BuyNowRequest>,
) -> Json<Value> {
    let lines = vec![CartLineInput {
        merchandise_id: body.variant_id,
        quantity: i64::from(body.quantity.unwrap_or(1)),
    }];

    let checkout_url = state.storefront().create_checkout(lines).await;

    Json(json!({
        "checkout_url": checkout_url,
        "message": "Redirigiendo a checkout",
    }))
}

// =============================================================================
// Quick Cart (session-held line items)
// =============================================================================

/// Quick cart display data.
#[derive(Debug, Serialize)]
pub struct QuickCartView {
    pub items: Vec<crate::cart::LocalCartItem>,
    pub item_count: u32,
    /// Subtotal formatted in COP.
    pub subtotal: String,
}

impl From<&LocalCart> for QuickCartView {
    fn from(cart: &LocalCart) -> Self {
        Self {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            subtotal: solara_core::Money::new(
                cart.subtotal_cop(),
                solara_core::CurrencyCode::COP,
            )
            .display_cop(),
        }
    }
}

/// Show the quick cart.
#[instrument(skip(session))]
pub async fn quick_show(session: Session) -> Json<QuickCartView> {
    let cart = load_quick_cart(&session).await;
    Json(QuickCartView::from(&cart))
}

/// Quick-cart add request body.
#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    /// Product handle to add.
    pub handle: String,
    /// Specific variant; defaults to the product's first variant.
    pub variant_id: Option<String>,
}

/// Add one unit of a product to the quick cart.
#[instrument(skip(state, session))]
pub async fn quick_add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<QuickAddRequest>,
) -> Result<Json<Value>> {
    let product = state
        .storefront()
        .get_product_by_handle(&body.handle)
        .await?;

    let mut cart = load_quick_cart(&session).await;
    let already_present = body
        .variant_id
        .as_deref()
        .or_else(|| product.primary_variant().map(|v| v.id.as_str()))
        .is_some_and(|id| cart.items().iter().any(|item| item.variant_id == id));

    cart.add(&product, body.variant_id.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    save_quick_cart(&session, &cart).await;

    let message = if already_present {
        format!("Se agregó otra unidad de {}", product.title)
    } else {
        format!("{} se agregó al carrito", product.title)
    };

    Ok(Json(json!({
        "message": message,
        "cart": QuickCartView::from(&cart),
    })))
}

/// Quick-cart update request body.
#[derive(Debug, Deserialize)]
pub struct QuickUpdateRequest {
    pub variant_id: String,
    pub quantity: u32,
}

/// Set a quick-cart line's quantity; zero removes it.
#[instrument(skip(session))]
pub async fn quick_update(
    session: Session,
    Json(body): Json<QuickUpdateRequest>,
) -> Json<QuickCartView> {
    let mut cart = load_quick_cart(&session).await;
    cart.update_quantity(&body.variant_id, body.quantity);
    save_quick_cart(&session, &cart).await;

    Json(QuickCartView::from(&cart))
}

/// Quick-cart remove request body.
#[derive(Debug, Deserialize)]
pub struct QuickRemoveRequest {
    pub variant_id: String,
}

/// Remove a line from the quick cart.
#[instrument(skip(session))]
pub async fn quick_remove(
    session: Session,
    Json(body): Json<QuickRemoveRequest>,
) -> Json<Value> {
    let mut cart = load_quick_cart(&session).await;
    let removed = cart.remove(&body.variant_id);
    save_quick_cart(&session, &cart).await;

    let message = removed.map_or_else(
        || "El producto no estaba en el carrito".to_string(),
        |item| format!("{} se eliminó del carrito", item.name),
    );

    Json(json!({
        "message": message,
        "cart": QuickCartView::from(&cart),
    }))
}

/// Empty the quick cart.
#[instrument(skip(session))]
pub async fn quick_clear(session: Session) -> Json<Value> {
    let cart = LocalCart::new();
    save_quick_cart(&session, &cart).await;

    Json(json!({
        "message": "Carrito vaciado",
        "cart": QuickCartView::from(&cart),
    }))
}

/// Create a checkout from the quick cart and empty it.
#[instrument(skip(state, session))]
pub async fn quick_checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Value>> {
    let mut cart = load_quick_cart(&session).await;

    if cart.is_empty() {
        return Err(AppError::BadRequest(
            "Agrega productos al carrito antes de proceder".to_string(),
        ));
    }

    let checkout_url = state
        .storefront()
        .create_checkout(cart.to_checkout_lines())
        .await;

    cart.clear();
    save_quick_cart(&session, &cart).await;

    Ok(Json(json!({
        "checkout_url": checkout_url,
        "message": "Se abrió una nueva ventana para completar tu compra",
    })))
}
