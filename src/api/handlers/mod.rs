//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

mod analytics;
mod cache;
mod stores;

use axum::Json;

use crate::models::HealthResponse;

pub use analytics::{get_analytics_handler, record_snapshot_handler};
pub use cache::{delete_cache_handler, get_cache_handler, set_cache_handler};
pub use stores::{create_store_handler, delete_store_handler, list_stores_handler};

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
