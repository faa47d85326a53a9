//! Order repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use solara_core::{CustomerId, OrderId};

use super::{RepositoryError, map_unique_violation};
use crate::models::Order;

const ORDER_COLUMNS: &str = "id, order_number, customer_id, customer_name, products, \
     total, status, order_date, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        order_number: &str,
        customer_id: Option<CustomerId>,
        customer_name: &str,
        products: &[String],
        total: Decimal,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO store_order (order_number, customer_id, customer_name, products, total)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_number)
        .bind(customer_id)
        .bind(customer_name)
        .bind(products)
        .bind(total)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "order number already exists"))?;

        Ok(order)
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order
             WHERE customer_id = $1
             ORDER BY order_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }
}
