//! Handlers for `/cache`: keyed reads, listings, writes and invalidation.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::cache::LIST_LIMIT;
use crate::error::{CacheError, Result};
use crate::models::{
    non_empty, require, CacheQuery, DeleteEntriesResponse, GetEntryResponse, ListKeysResponse,
    SetEntryRequest, SetEntryResponse,
};

/// Handler for GET /cache
///
/// With `key`, reads one entry: 200 on hit, 404 on miss (flagged `expired`
/// when the TTL had elapsed). Without `key`, lists up to 100 entries newest
/// first, optionally filtered by `pattern`.
pub async fn get_cache_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<CacheQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let store_id = require(query.store_id, "storeId")?;
    let handle = state.store(&store_id).await?;

    if let Some(key) = non_empty(query.key) {
        // Write lock: reads bump counters and may delete expired entries
        let lookup = handle.cache.write().await.get(&key);
        let status = if lookup.is_hit() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        debug!("GET {} in store {}: hit={}", key, store_id, lookup.is_hit());
        return Ok((status, Json(GetEntryResponse::from(lookup))).into_response());
    }

    let pattern = non_empty(query.pattern);
    let keys = handle.cache.read().await.list(pattern.as_deref(), LIST_LIMIT);
    Ok(Json(ListKeysResponse { keys }).into_response())
}

/// Handler for POST /cache
///
/// Upserts an entry. Writes are admitted even past the store quota; the
/// overflow is logged.
pub async fn set_cache_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetEntryRequest>, JsonRejection>,
) -> Result<Json<SetEntryResponse>> {
    let Json(req) = payload?;
    let entry = req.validate()?;
    let handle = state.store(&entry.store_id).await?;

    let mut cache = handle.cache.write().await;
    // Deletion unregisters the store before its engine is dropped
    if !state.registry.contains(handle.id()).await {
        return Err(CacheError::store_not_found());
    }
    let expires_at = cache.set(
        entry.key.clone(),
        entry.value,
        entry.ttl_seconds,
        entry.metadata,
    );

    if cache.is_over_quota() {
        warn!(
            "Store '{}' ({}) over quota: {} of {} bytes used",
            handle.store.name,
            handle.id(),
            cache.memory_used_bytes(),
            cache.max_memory_bytes()
        );
    }

    Ok(Json(SetEntryResponse::new(entry.key, expires_at)))
}

/// What a DELETE /cache request removes.
enum Invalidation {
    Key(String),
    Pattern(String),
    All,
}

impl Invalidation {
    fn from_query(query: &CacheQuery) -> Result<Self> {
        if let Some(key) = non_empty(query.key.clone()) {
            Ok(Invalidation::Key(key))
        } else if let Some(pattern) = non_empty(query.pattern.clone()) {
            Ok(Invalidation::Pattern(pattern))
        } else if query.flush_all() {
            Ok(Invalidation::All)
        } else {
            Err(CacheError::missing("key, pattern, or all=true"))
        }
    }
}

/// Handler for DELETE /cache
///
/// Removes one key, every key containing `pattern`, or the whole store
/// (`all=true`), checked in that order.
pub async fn delete_cache_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<CacheQuery>, QueryRejection>,
) -> Result<Json<DeleteEntriesResponse>> {
    let Query(query) = query?;
    let store_id = require(query.store_id.clone(), "storeId")?;
    let invalidation = Invalidation::from_query(&query)?;
    let handle = state.store(&store_id).await?;

    let mut cache = handle.cache.write().await;
    let deleted = match invalidation {
        Invalidation::Key(key) => cache.delete(&key),
        Invalidation::Pattern(pattern) => {
            let deleted = cache.delete_by_pattern(&pattern);
            info!(
                "Invalidated {} keys matching '{}' in store {}",
                deleted, pattern, store_id
            );
            deleted
        }
        Invalidation::All => {
            let deleted = cache.flush();
            info!("Flushed {} keys from store {}", deleted, store_id);
            deleted
        }
    };

    Ok(Json(DeleteEntriesResponse::new(deleted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    async fn state_with_store() -> (AppState, String) {
        let state = AppState::from_config(&Config::default());
        let store = state
            .registry
            .create_store("alice", "main", None, 1)
            .await
            .unwrap();
        (state, store.id.to_string())
    }

    fn set_request(store_id: &str, key: &str, value: serde_json::Value) -> SetEntryRequest {
        SetEntryRequest {
            store_id: Some(store_id.to_string()),
            key: Some(key.to_string()),
            value: Some(value),
            ttl_seconds: None,
            metadata: None,
        }
    }

    fn key_query(store_id: &str, key: &str) -> CacheQuery {
        CacheQuery {
            store_id: Some(store_id.to_string()),
            key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let (state, id) = state_with_store().await;

        let req = set_request(&id, "k", json!("v"));
        let response = set_cache_handler(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();
        assert_eq!(response.key, "k");
        assert!(response.expires_at.is_none());

        let response = get_cache_handler(State(state), Ok(Query(key_query(&id, "k"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_miss_is_not_found() {
        let (state, id) = state_with_store().await;

        let response = get_cache_handler(State(state), Ok(Query(key_query(&id, "nope"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_set_unknown_store() {
        let state = AppState::from_config(&Config::default());
        let req = set_request(&uuid::Uuid::new_v4().to_string(), "k", json!("v"));

        let result = set_cache_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let (state, id) = state_with_store().await;
        let req = set_request(&id, "", json!("v"));

        let result = set_cache_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_set_over_quota_is_admitted() {
        let (state, id) = state_with_store().await;
        let big = "x".repeat(2 * 1024 * 1024);

        let req = set_request(&id, "big", json!(big));
        let result = set_cache_handler(State(state.clone()), Ok(Json(req))).await;
        assert!(result.is_ok());

        let handle = state.store(&id).await.unwrap();
        assert!(handle.cache.read().await.is_over_quota());
    }

    #[tokio::test]
    async fn test_delete_requires_target() {
        let (state, id) = state_with_store().await;
        let query = CacheQuery {
            store_id: Some(id),
            all: Some("false".to_string()),
            ..Default::default()
        };

        let result = delete_cache_handler(State(state), Ok(Query(query))).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_key_prefers_key_over_pattern() {
        let (state, id) = state_with_store().await;
        for key in ["k1", "k2"] {
            set_cache_handler(State(state.clone()), Ok(Json(set_request(&id, key, json!("v")))))
                .await
                .unwrap();
        }

        let query = CacheQuery {
            store_id: Some(id),
            key: Some("k1".to_string()),
            pattern: Some("k".to_string()),
            ..Default::default()
        };
        let response = delete_cache_handler(State(state), Ok(Query(query))).await.unwrap();
        assert_eq!(response.deleted, 1);
    }

    #[tokio::test]
    async fn test_set_into_deleted_store_is_not_found() {
        let (state, id) = state_with_store().await;
        let handle = state.store(&id).await.unwrap();

        // Hold the cache lock so the write stalls after its store lookup
        let cache = handle.cache.write().await;
        let pending = tokio::spawn({
            let state = state.clone();
            let req = set_request(&id, "k", json!("v"));
            async move { set_cache_handler(State(state), Ok(Json(req))).await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        state.registry.delete_store(handle.id()).await.unwrap();
        drop(cache);

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert!(handle.cache.read().await.is_empty());
    }
}
