//! Analytics Recorder Module
//!
//! Captures immutable rollups of store counters and serves them back by
//! time range.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::cache::EXPIRING_WINDOW_SECS;
use crate::error::{CacheError, Result};
use crate::registry::{StoreHandle, StoreRegistry};

// == Analytics Snapshot ==
/// Point-in-time rollup for one store. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub id: Uuid,
    pub store_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub total_keys: usize,
    pub total_hits: u64,
    pub total_misses: u64,
    pub memory_used_bytes: u64,
    /// Percentage, 2 decimals
    pub hit_rate: f64,
}

// == Analytics Recorder ==
/// Append-only snapshot log per store.
#[derive(Debug)]
pub struct AnalyticsRecorder {
    registry: Arc<StoreRegistry>,
    /// Snapshots per store, in recording order
    history: RwLock<HashMap<Uuid, Vec<AnalyticsSnapshot>>>,
}

impl AnalyticsRecorder {
    pub fn new(registry: Arc<StoreRegistry>) -> Self {
        Self {
            registry,
            history: RwLock::new(HashMap::new()),
        }
    }

    // == Snapshot ==
    /// Records the current counters of `store_id`.
    ///
    /// Fails with `NotFound` if the store does not exist, including when it
    /// is deleted while the snapshot waits on its cache lock.
    pub async fn snapshot(&self, store_id: Uuid) -> Result<AnalyticsSnapshot> {
        let handle = self.registry.get_store(store_id).await?;
        self.record(&handle, Utc::now())
            .await
            .ok_or_else(CacheError::store_not_found)
    }

    /// Snapshots every live store. Returns how many were recorded.
    pub async fn snapshot_all(&self) -> usize {
        let handles = self.registry.handles().await;
        let now = Utc::now();
        let mut recorded = 0;
        for handle in &handles {
            if self.record(handle, now).await.is_some() {
                recorded += 1;
            }
        }
        recorded
    }

    /// Appends a snapshot of `handle`, or returns `None` if the store was
    /// deleted before the snapshot could be filed.
    async fn record(
        &self,
        handle: &StoreHandle,
        now: DateTime<Utc>,
    ) -> Option<AnalyticsSnapshot> {
        let stats = handle
            .cache
            .read()
            .await
            .stats(Duration::seconds(EXPIRING_WINDOW_SECS));

        let snapshot = AnalyticsSnapshot {
            id: Uuid::new_v4(),
            store_id: handle.id(),
            timestamp: now,
            total_keys: stats.key_count,
            total_hits: stats.total_hits,
            total_misses: stats.total_misses,
            memory_used_bytes: stats.memory_used_bytes,
            hit_rate: stats.hit_rate(),
        };

        let mut history = self.history.write().await;
        // Store deletion unregisters before it calls `forget`, so checking
        // under the history lock never leaves an orphaned log behind
        if !self.registry.contains(snapshot.store_id).await {
            debug!("Dropped snapshot for deleted store {}", snapshot.store_id);
            return None;
        }
        let log = history.entry(snapshot.store_id).or_default();
        // Keep the log sorted even if the clock stepped back between calls
        let at = log.partition_point(|existing| existing.timestamp <= snapshot.timestamp);
        log.insert(at, snapshot.clone());

        debug!(
            "Recorded snapshot for store {}: keys={}, hit_rate={}",
            snapshot.store_id, snapshot.total_keys, snapshot.hit_rate
        );
        Some(snapshot)
    }

    // == Query Range ==
    /// Snapshots with `start <= timestamp <= end`, oldest first.
    pub async fn query_range(
        &self,
        store_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<AnalyticsSnapshot> {
        self.history
            .read()
            .await
            .get(&store_id)
            .map(|log| {
                log.iter()
                    .filter(|s| s.timestamp >= start && s.timestamp <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // == Forget ==
    /// Drops the history of a deleted store.
    pub async fn forget(&self, store_id: Uuid) {
        self.history.write().await.remove(&store_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (Arc<StoreRegistry>, AnalyticsRecorder, Uuid) {
        let registry = Arc::new(StoreRegistry::new());
        let store = registry.create_store("alice", "x", None, 1).await.unwrap();
        let recorder = AnalyticsRecorder::new(registry.clone());
        (registry, recorder, store.id)
    }

    #[tokio::test]
    async fn test_snapshot_captures_stats() {
        let (registry, recorder, id) = setup().await;
        {
            let handle = registry.get_store(id).await.unwrap();
            let mut cache = handle.cache.write().await;
            cache.set("a".to_string(), "hello".to_string(), None, None);
            cache.get("a");
            cache.get("a");
            cache.get("b");
        }

        let snapshot = recorder.snapshot(id).await.unwrap();
        assert_eq!(snapshot.store_id, id);
        assert_eq!(snapshot.total_keys, 1);
        assert_eq!(snapshot.total_hits, 2);
        assert_eq!(snapshot.total_misses, 1);
        assert_eq!(snapshot.memory_used_bytes, 5);
        assert_eq!(snapshot.hit_rate, 66.67);
    }

    #[tokio::test]
    async fn test_snapshot_unknown_store() {
        let (_registry, recorder, _id) = setup().await;
        let result = recorder.snapshot(Uuid::new_v4()).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_snapshots_are_immutable() {
        let (registry, recorder, id) = setup().await;
        let first = recorder.snapshot(id).await.unwrap();

        {
            let handle = registry.get_store(id).await.unwrap();
            handle
                .cache
                .write()
                .await
                .set("k".to_string(), "v".to_string(), None, None);
        }
        recorder.snapshot(id).await.unwrap();

        let now = Utc::now();
        let history = recorder
            .query_range(id, now - Duration::hours(1), now)
            .await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], first);
        assert_eq!(history[0].total_keys, 0);
        assert_eq!(history[1].total_keys, 1);
    }

    #[tokio::test]
    async fn test_query_range_is_ascending_and_bounded() {
        let (_registry, recorder, id) = setup().await;
        for _ in 0..3 {
            recorder.snapshot(id).await.unwrap();
        }

        let now = Utc::now();
        let all = recorder.query_range(id, now - Duration::hours(1), now).await;
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let future = recorder
            .query_range(id, now + Duration::hours(1), now + Duration::hours(2))
            .await;
        assert!(future.is_empty());
        assert!(recorder
            .query_range(Uuid::new_v4(), now - Duration::hours(1), now)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_all_and_forget() {
        let (registry, recorder, id) = setup().await;
        let other = registry.create_store("bob", "y", None, 1).await.unwrap();

        assert_eq!(recorder.snapshot_all().await, 2);

        recorder.forget(id).await;
        let now = Utc::now();
        assert!(recorder
            .query_range(id, now - Duration::hours(1), now)
            .await
            .is_empty());
        assert_eq!(
            recorder
                .query_range(other.id, now - Duration::hours(1), now)
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_store_deleted_during_snapshot_leaves_no_history() {
        let (registry, recorder, id) = setup().await;
        let recorder = Arc::new(recorder);
        let handle = registry.get_store(id).await.unwrap();

        // Hold the cache lock so the snapshot stalls after its store lookup
        let cache = handle.cache.write().await;
        let pending = tokio::spawn({
            let recorder = recorder.clone();
            async move { recorder.snapshot(id).await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        registry.delete_store(id).await.unwrap();
        recorder.forget(id).await;
        drop(cache);

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(CacheError::NotFound(_))));

        let now = Utc::now();
        assert!(recorder
            .query_range(id, now - Duration::hours(1), now)
            .await
            .is_empty());
        assert!(recorder.history.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_all_skips_deleted_stores() {
        let (registry, recorder, id) = setup().await;
        let handle = registry.get_store(id).await.unwrap();
        registry.delete_store(id).await.unwrap();

        assert!(recorder.record(&handle, Utc::now()).await.is_none());
        assert_eq!(recorder.snapshot_all().await, 0);
    }
}
