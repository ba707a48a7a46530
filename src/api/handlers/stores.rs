//! Handlers for `/stores`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::api::{state::parse_store_id, AppState};
use crate::error::Result;
use crate::models::{
    require, CreateStoreRequest, CreateStoreResponse, OwnerQuery, StoreIdQuery, StoresResponse,
    SuccessResponse,
};

/// Handler for GET /stores
///
/// Lists the owner's stores newest first, each with derived stats.
pub async fn list_stores_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<OwnerQuery>, QueryRejection>,
) -> Result<Json<StoresResponse>> {
    let Query(query) = query?;
    let user_id = require(query.user_id, "userId")?;
    let stores = state.registry.list_stores(&user_id).await;
    Ok(Json(StoresResponse { stores }))
}

/// Handler for POST /stores
pub async fn create_store_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateStoreRequest>, JsonRejection>,
) -> Result<Json<CreateStoreResponse>> {
    let Json(req) = payload?;
    let name = require(req.name, "name")?;
    let user_id = require(req.user_id, "userId")?;
    let max_memory_mb = req.max_memory_mb.unwrap_or(state.default_max_memory_mb);

    let store = state
        .registry
        .create_store(&user_id, &name, req.description, max_memory_mb)
        .await?;

    Ok(Json(CreateStoreResponse {
        success: true,
        store,
    }))
}

/// Handler for DELETE /stores
///
/// Drops the store, its entries and its analytics history.
pub async fn delete_store_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<StoreIdQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse>> {
    let Query(query) = query?;
    let store_id = parse_store_id(&require(query.store_id, "storeId")?)?;

    state.registry.delete_store(store_id).await?;
    state.analytics.forget(store_id).await;

    Ok(Json(SuccessResponse::ok()))
}
