//! Customer repository for database operations.

use sqlx::PgPool;

use solara_core::{CustomerId, Email};

use super::{RepositoryError, map_unique_violation};
use crate::models::Customer;

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, location, avatar, skin_type, \
     favorite_products, rating, total_spent, total_scans, last_purchase, \
     last_scan_date, last_scan_summary, last_interactions_summary, \
     customer_notes, created_at, updated_at";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Create a new customer with just a name and email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str, email: &Email) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customer (name, email) VALUES ($1, $2) RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        Ok(customer)
    }

    /// Get the customer for an email, creating the profile if absent.
    ///
    /// An existing profile keeps its stored name; the passed name is only
    /// used when inserting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(
        &self,
        name: &str,
        email: &Email,
    ) -> Result<Customer, RepositoryError> {
        if let Some(existing) = self.get_by_email(email).await? {
            return Ok(existing);
        }

        match self.create(name, email).await {
            Ok(customer) => Ok(customer),
            // Lost a race with a concurrent insert for the same email
            Err(RepositoryError::Conflict(_)) => self
                .get_by_email(email)
                .await?
                .ok_or(RepositoryError::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Update the scan counters after a new scan is recorded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn record_scan(
        &self,
        id: CustomerId,
        summary: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE customer
             SET total_scans = COALESCE(total_scans, 0) + 1,
                 last_scan_date = NOW(),
                 last_scan_summary = COALESCE($2, last_scan_summary),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(summary)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
