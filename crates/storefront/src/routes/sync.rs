//! Inventory sync route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::inventory_sync::{SyncError, SyncSummary, sync_inventory};
use crate::state::AppState;

impl From<SyncError> for AppError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Shopify(e) => Self::Shopify(e),
            SyncError::Repository(e) => Self::Database(e),
        }
    }
}

/// Pull the full Shopify catalog into the local inventory table.
#[instrument(skip(state))]
pub async fn inventory(State(state): State<AppState>) -> Result<Json<SyncSummary>> {
    let summary = sync_inventory(state.storefront(), state.pool()).await?;
    Ok(Json(summary))
}
