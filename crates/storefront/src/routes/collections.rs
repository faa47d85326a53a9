//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::shopify::types::{Collection, CollectionWithProducts};
use crate::state::AppState;

/// List collections.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Collection>>> {
    let collections = state.storefront().get_collections().await?;
    Ok(Json(collections))
}

/// Query parameters for a collection's products.
#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    pub first: Option<i64>,
    pub after: Option<String>,
}

/// A collection and a page of its products.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<CollectionParams>,
) -> Result<Json<CollectionWithProducts>> {
    let collection = state
        .storefront()
        .get_collection_products(&handle, params.first, params.after)
        .await?;
    Ok(Json(collection))
}
