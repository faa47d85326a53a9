//! Inventory repository for database operations.
//!
//! Stock adjustments write the inventory row and its audit-log entry in a
//! single transaction so the trail can never drift from the stock count.

use sqlx::PgPool;

use solara_core::{InventoryAction, InventoryItemId, OrderId};

use super::RepositoryError;
use crate::models::{InventoryItem, InventoryLogEntry, SyncedProduct};

const INVENTORY_COLUMNS: &str = "id, name, category, brand, description, price, stock, \
     image, images, skin_types, tags, rating, shopify_product_id, shopify_variant_id, \
     created_at, updated_at";

const LOG_COLUMNS: &str = "id, inventory_item_id, action_type, quantity_change, \
     previous_stock, new_stock, related_order_id, notes, is_manual_upload, created_at";

/// Repository for inventory database operations.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full local inventory, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get an inventory item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: InventoryItemId,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Upsert a product pulled from Shopify, matching on name.
    ///
    /// Returns `true` when a new row was inserted, `false` when an existing
    /// row was updated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_synced(&self, product: &SyncedProduct) -> Result<bool, RepositoryError> {
        let existing: Option<(uuid::Uuid,)> =
            sqlx::query_as("SELECT id FROM inventory WHERE name = $1")
                .bind(&product.name)
                .fetch_optional(self.pool)
                .await?;

        match existing {
            Some((id,)) => {
                sqlx::query(
                    "UPDATE inventory
                     SET category = $2, description = $3, price = $4, stock = $5,
                         image = $6, skin_types = $7,
                         shopify_product_id = $8, shopify_variant_id = $9,
                         updated_at = NOW()
                     WHERE id = $1",
                )
                .bind(id)
                .bind(&product.category)
                .bind(product.description.as_deref())
                .bind(product.price)
                .bind(product.stock)
                .bind(product.image.as_deref())
                .bind(&product.tags)
                .bind(&product.shopify_product_id)
                .bind(product.shopify_variant_id.as_deref())
                .execute(self.pool)
                .await?;

                Ok(false)
            }
            None => {
                sqlx::query(
                    "INSERT INTO inventory
                         (name, category, description, price, stock, image, skin_types,
                          shopify_product_id, shopify_variant_id)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(&product.name)
                .bind(&product.category)
                .bind(product.description.as_deref())
                .bind(product.price)
                .bind(product.stock)
                .bind(product.image.as_deref())
                .bind(&product.tags)
                .bind(&product.shopify_product_id)
                .bind(product.shopify_variant_id.as_deref())
                .execute(self.pool)
                .await?;

                Ok(true)
            }
        }
    }

    /// Adjust stock for an item and record the movement in the audit log.
    ///
    /// The update and the log insert run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adjust_stock(
        &self,
        id: InventoryItemId,
        quantity_change: i32,
        action: InventoryAction,
        related_order_id: Option<OrderId>,
        notes: Option<&str>,
    ) -> Result<InventoryLogEntry, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<(i32,)> =
            sqlx::query_as("SELECT stock FROM inventory WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((previous_stock,)) = previous else {
            return Err(RepositoryError::NotFound);
        };

        // Stock never goes below zero, even on oversell
        let new_stock = (previous_stock + quantity_change).max(0);

        sqlx::query("UPDATE inventory SET stock = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_stock)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, InventoryLogEntry>(&format!(
            "INSERT INTO inventory_log
                 (inventory_item_id, action_type, quantity_change, previous_stock,
                  new_stock, related_order_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {LOG_COLUMNS}"
        ))
        .bind(id)
        .bind(action)
        .bind(quantity_change)
        .bind(previous_stock)
        .bind(new_stock)
        .bind(related_order_id)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(entry)
    }

    /// List the stock movements for an item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_logs(
        &self,
        id: InventoryItemId,
    ) -> Result<Vec<InventoryLogEntry>, RepositoryError> {
        let logs = sqlx::query_as::<_, InventoryLogEntry>(&format!(
            "SELECT {LOG_COLUMNS} FROM inventory_log
             WHERE inventory_item_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }
}
