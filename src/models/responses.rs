//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::analytics::AnalyticsSnapshot;
use crate::cache::{EntrySummary, Lookup, StoreStats};
use crate::registry::{Store, StoreSummary};

/// Response body for a keyed read (`GET /cache?storeId&key`)
#[derive(Debug, Clone, Serialize)]
pub struct GetEntryResponse {
    pub hit: bool,
    pub value: Option<String>,
    pub metadata: Option<Value>,
    /// Present only when the miss was caused by TTL expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl From<Lookup> for GetEntryResponse {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Hit { value, metadata } => Self {
                hit: true,
                value: Some(value),
                metadata,
                expired: None,
            },
            Lookup::Miss { expired } => Self {
                hit: false,
                value: None,
                metadata: None,
                expired: expired.then_some(true),
            },
        }
    }
}

/// Response body for a key listing (`GET /cache?storeId`)
#[derive(Debug, Clone, Serialize)]
pub struct ListKeysResponse {
    pub keys: Vec<EntrySummary>,
}

/// Response body for `POST /cache`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntryResponse {
    pub success: bool,
    pub key: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SetEntryResponse {
    pub fn new(key: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            success: true,
            key: key.into(),
            expires_at,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEntriesResponse {
    pub success: bool,
    pub deleted: usize,
}

impl DeleteEntriesResponse {
    pub fn new(deleted: usize) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}

/// Response body for `GET /stores`
#[derive(Debug, Clone, Serialize)]
pub struct StoresResponse {
    pub stores: Vec<StoreSummary>,
}

/// Response body for `POST /stores`
#[derive(Debug, Clone, Serialize)]
pub struct CreateStoreResponse {
    pub success: bool,
    pub store: Store,
}

/// Bare acknowledgement, used by `DELETE /stores`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Live stats returned next to analytics history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStats {
    pub total_keys: usize,
    pub total_hits: u64,
    pub total_misses: u64,
    /// Bytes
    pub memory_used: u64,
    #[serde(rename = "maxMemoryMB")]
    pub max_memory_mb: u64,
    #[serde(rename = "expiringIn1h")]
    pub expiring_in_1h: usize,
    pub hit_rate: f64,
    pub memory_usage_percent: f64,
}

impl CurrentStats {
    /// Builds the view from stats taken with a one-hour expiry window.
    pub fn new(stats: &StoreStats, store: &Store) -> Self {
        Self {
            total_keys: stats.key_count,
            total_hits: stats.total_hits,
            total_misses: stats.total_misses,
            memory_used: stats.memory_used_bytes,
            max_memory_mb: store.max_memory_mb,
            expiring_in_1h: stats.expiring_within,
            hit_rate: stats.hit_rate(),
            memory_usage_percent: stats.memory_usage_percent(store.max_memory_bytes()),
        }
    }
}

/// Response body for `GET /analytics`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub analytics: Vec<AnalyticsSnapshot>,
    pub current: CurrentStats,
}

/// Response body for `POST /analytics`
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub success: bool,
    pub analytics: AnalyticsSnapshot,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
