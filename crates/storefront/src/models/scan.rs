//! Facial scan result model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use solara_core::{CustomerId, ScanId};

/// A historic facial-scanner analysis.
///
/// Each metric is a 0-100 score produced by the scanner; all are optional
/// because older scans predate some metrics.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoricScan {
    pub id: ScanId,
    pub client_email: String,
    pub customer_id: Option<CustomerId>,
    pub date_scan: Option<DateTime<Utc>>,
    pub global_score: Option<Decimal>,
    pub acne: Option<Decimal>,
    pub blackhead: Option<Decimal>,
    pub wrinkle: Option<Decimal>,
    pub forehead_wrinkles: Option<Decimal>,
    pub under_eye_wrinkles: Option<Decimal>,
    pub crows_feet: Option<Decimal>,
    pub glabellar_lines: Option<Decimal>,
    pub nasolabial_folds: Option<Decimal>,
    pub perioral_lines: Option<Decimal>,
    pub dark_circles: Option<Decimal>,
    pub pore: Option<Decimal>,
    pub small_pore: Option<Decimal>,
    pub medium_pore: Option<Decimal>,
    pub large_pore: Option<Decimal>,
    pub pigment: Option<Decimal>,
    pub spot: Option<Decimal>,
    pub sensitivity: Option<Decimal>,
    pub pore_diagnostic_image: Option<String>,
    pub wrinkle_diagnostic_image: Option<String>,
}
