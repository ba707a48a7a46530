//! Handlers for `/analytics`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{Duration, Utc};

use crate::analytics::Period;
use crate::api::{state::parse_store_id, AppState};
use crate::cache::EXPIRING_WINDOW_SECS;
use crate::error::Result;
use crate::models::{
    require, AnalyticsQuery, AnalyticsResponse, CurrentStats, SnapshotRequest, SnapshotResponse,
};

/// Handler for GET /analytics
///
/// Returns the snapshots recorded within `period` (default `24h`) together
/// with the store's live stats.
pub async fn get_analytics_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AnalyticsResponse>> {
    let Query(query) = query?;
    let store_id = require(query.store_id, "storeId")?;
    let handle = state.store(&store_id).await?;
    let period = Period::from_param(query.period.as_deref());

    let now = Utc::now();
    let analytics = state
        .analytics
        .query_range(handle.id(), period.start_time(now), now)
        .await;

    let stats = handle
        .cache
        .read()
        .await
        .stats(Duration::seconds(EXPIRING_WINDOW_SECS));

    Ok(Json(AnalyticsResponse {
        analytics,
        current: CurrentStats::new(&stats, &handle.store),
    }))
}

/// Handler for POST /analytics
///
/// Records one snapshot of the store's counters.
pub async fn record_snapshot_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SnapshotRequest>, JsonRejection>,
) -> Result<Json<SnapshotResponse>> {
    let Json(req) = payload?;
    let store_id = parse_store_id(&require(req.store_id, "storeId")?)?;

    let analytics = state.analytics.snapshot(store_id).await?;

    Ok(Json(SnapshotResponse {
        success: true,
        analytics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::CacheError;

    #[tokio::test]
    async fn test_snapshot_then_query() {
        let state = AppState::from_config(&Config::default());
        let store = state
            .registry
            .create_store("alice", "x", None, 1)
            .await
            .unwrap();
        let id = store.id.to_string();

        let req = SnapshotRequest {
            store_id: Some(id.clone()),
        };
        let response = record_snapshot_handler(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();
        assert_eq!(response.analytics.store_id, store.id);

        let query = AnalyticsQuery {
            store_id: Some(id),
            period: Some("1h".to_string()),
        };
        let response = get_analytics_handler(State(state), Ok(Query(query)))
            .await
            .unwrap();
        assert_eq!(response.analytics.len(), 1);
        assert_eq!(response.current.max_memory_mb, 1);
    }

    #[tokio::test]
    async fn test_missing_store_id() {
        let state = AppState::from_config(&Config::default());

        let query = Ok(Query(AnalyticsQuery::default()));
        let result = get_analytics_handler(State(state), query).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
