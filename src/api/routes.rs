//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_store_handler, delete_cache_handler, delete_store_handler, get_analytics_handler,
    get_cache_handler, health_handler, list_stores_handler, record_snapshot_handler,
    set_cache_handler,
};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST|DELETE /cache` - Entry reads, listings, writes and invalidation
/// - `GET|POST|DELETE /stores` - Store listing, creation and deletion
/// - `GET|POST /analytics` - Snapshot history and snapshot capture
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/cache",
            get(get_cache_handler)
                .post(set_cache_handler)
                .delete(delete_cache_handler),
        )
        .route(
            "/stores",
            get(list_stores_handler)
                .post(create_store_handler)
                .delete(delete_store_handler),
        )
        .route(
            "/analytics",
            get(get_analytics_handler).post(record_snapshot_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
