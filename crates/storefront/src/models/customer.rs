//! Customer profile model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use solara_core::{CustomerId, Email};

/// A customer profile.
///
/// Identity lives with the external auth provider; profiles are keyed by
/// email and enriched over time by bookings, scans, and purchases.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    /// Self-reported skin type (e.g., "mixta", "grasa", "seca").
    pub skin_type: Option<String>,
    pub favorite_products: Option<Vec<String>>,
    pub rating: Option<rust_decimal::Decimal>,
    pub total_spent: Option<rust_decimal::Decimal>,
    pub total_scans: Option<i32>,
    pub last_purchase: Option<DateTime<Utc>>,
    pub last_scan_date: Option<DateTime<Utc>>,
    pub last_scan_summary: Option<String>,
    pub last_interactions_summary: Option<String>,
    pub customer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
