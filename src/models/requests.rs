//! Request DTOs for the cache server API
//!
//! Defines query strings and JSON bodies accepted by the handlers. Every
//! field is optional at the serde level so that a missing field becomes a
//! 400 with a readable message instead of an extractor rejection.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Returns the field value, treating an empty string as missing.
pub fn require(field: Option<String>, name: &str) -> Result<String> {
    field
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CacheError::missing(name))
}

/// Drops empty query parameters (`?pattern=` is the same as no pattern).
pub fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

// == Cache ==

/// Query string for `GET /cache` and `DELETE /cache`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheQuery {
    pub store_id: Option<String>,
    pub key: Option<String>,
    pub pattern: Option<String>,
    pub all: Option<String>,
}

impl CacheQuery {
    /// Only the literal `all=true` flushes a store.
    pub fn flush_all(&self) -> bool {
        self.all.as_deref() == Some("true")
    }
}

/// Request body for `POST /cache`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntryRequest {
    pub store_id: Option<String>,
    pub key: Option<String>,
    /// Any JSON value; strings are stored verbatim, others as compact JSON
    pub value: Option<Value>,
    pub ttl_seconds: Option<u64>,
    pub metadata: Option<Value>,
}

/// A `SetEntryRequest` with its required fields present.
#[derive(Debug, Clone)]
pub struct SetEntry {
    pub store_id: String,
    pub key: String,
    pub value: String,
    pub ttl_seconds: Option<u64>,
    pub metadata: Option<Value>,
}

impl SetEntryRequest {
    /// Checks required fields and serializes the value.
    pub fn validate(self) -> Result<SetEntry> {
        // serde maps `"value": null` to None, so an explicit null is rejected
        // as missing rather than stored as the text "null"
        let (Some(store_id), Some(key), Some(value)) = (
            non_empty(self.store_id),
            non_empty(self.key),
            self.value,
        ) else {
            return Err(CacheError::missing("storeId, key, and value"));
        };

        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Ok(SetEntry {
            store_id,
            key,
            value,
            ttl_seconds: self.ttl_seconds,
            metadata: self.metadata,
        })
    }
}

// == Stores ==

/// Query string for `GET /stores`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

/// Query string carrying only a store id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreIdQuery {
    pub store_id: Option<String>,
}

/// Request body for `POST /stores`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "maxMemoryMB")]
    pub max_memory_mb: Option<u64>,
    pub user_id: Option<String>,
}

// == Analytics ==

/// Query string for `GET /analytics`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub store_id: Option<String>,
    pub period: Option<String>,
}

/// Request body for `POST /analytics`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    pub store_id: Option<String>,
}
