//! Local inventory models.
//!
//! The inventory table is both the catalog fallback when Shopify is
//! unreachable and the target of the Shopify sync routine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use solara_core::{InventoryAction, InventoryItemId, InventoryLogId, OrderId};

/// A product row in the local inventory.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    /// Price in COP.
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    /// Skin types this product suits; doubles as the tag list when the
    /// row backs a catalog fallback product.
    pub skin_types: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub rating: Option<Decimal>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stock movement in the audit trail.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryLogEntry {
    pub id: InventoryLogId,
    pub inventory_item_id: InventoryItemId,
    pub action_type: InventoryAction,
    pub quantity_change: i32,
    pub previous_stock: Option<i32>,
    pub new_stock: Option<i32>,
    pub related_order_id: Option<OrderId>,
    pub notes: Option<String>,
    pub is_manual_upload: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// A product as pulled from Shopify during an inventory sync.
#[derive(Debug, Clone)]
pub struct SyncedProduct {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub shopify_product_id: String,
    pub shopify_variant_id: Option<String>,
}
