//! Historic scan repository for database operations.

use sqlx::PgPool;

use solara_core::{CustomerId, Email};

use super::RepositoryError;
use crate::models::HistoricScan;

const SCAN_COLUMNS: &str = "id, client_email, customer_id, date_scan, global_score, \
     acne, blackhead, wrinkle, forehead_wrinkles, under_eye_wrinkles, crows_feet, \
     glabellar_lines, nasolabial_folds, perioral_lines, dark_circles, pore, \
     small_pore, medium_pore, large_pore, pigment, spot, sensitivity, \
     pore_diagnostic_image, wrinkle_diagnostic_image";

/// Repository for facial-scan database operations.
pub struct ScanRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScanRepository<'a> {
    /// Create a new scan repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List scans for a customer ID, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<HistoricScan>, RepositoryError> {
        let scans = sqlx::query_as::<_, HistoricScan>(&format!(
            "SELECT {SCAN_COLUMNS} FROM historic_scan
             WHERE customer_id = $1
             ORDER BY date_scan DESC NULLS LAST"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scans)
    }

    /// List scans recorded against an email address, newest first.
    ///
    /// Scans taken before the customer profile existed are linked by email
    /// only, so account views query both ways.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_email(
        &self,
        email: &Email,
    ) -> Result<Vec<HistoricScan>, RepositoryError> {
        let scans = sqlx::query_as::<_, HistoricScan>(&format!(
            "SELECT {SCAN_COLUMNS} FROM historic_scan
             WHERE client_email = $1
             ORDER BY date_scan DESC NULLS LAST"
        ))
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(scans)
    }

    /// The most recent scan for an email address, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest_for_email(
        &self,
        email: &Email,
    ) -> Result<Option<HistoricScan>, RepositoryError> {
        let scan = sqlx::query_as::<_, HistoricScan>(&format!(
            "SELECT {SCAN_COLUMNS} FROM historic_scan
             WHERE client_email = $1
             ORDER BY date_scan DESC NULLS LAST
             LIMIT 1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(scan)
    }
}
