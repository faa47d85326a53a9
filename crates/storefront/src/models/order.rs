//! Order record model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use solara_core::{CustomerId, OrderId, OrderStatus};

/// A local order record.
///
/// Payment itself happens on Shopify-hosted checkout; these rows exist so
/// the studio can see purchase history next to scans and appointments.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    /// Product names included in the order.
    pub products: Vec<String>,
    pub total: Decimal,
    pub status: Option<OrderStatus>,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
