//! cachehub - A multi-tenant in-memory cache server
//!
//! Named stores with lazy TTL expiration, hit/miss accounting, memory quotas
//! and analytics snapshots, served over a JSON REST API.

pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_cleanup_task, spawn_snapshot_task};
