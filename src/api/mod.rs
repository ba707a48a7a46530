//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /cache?storeId&key` - Read one entry
//! - `GET /cache?storeId&pattern` - List entries
//! - `POST /cache` - Upsert an entry
//! - `DELETE /cache?storeId&key|pattern|all=true` - Invalidate entries
//! - `GET|POST|DELETE /stores` - Manage stores
//! - `GET|POST /analytics` - Query and record snapshots
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod state;

pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
