//! Periodic analytics snapshots.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::analytics::AnalyticsRecorder;

/// Spawns a task that snapshots every store each `interval_secs`.
pub fn spawn_snapshot_task(recorder: Arc<AnalyticsRecorder>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting analytics snapshot task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let recorded = recorder.snapshot_all().await;
            debug!("Analytics snapshot: recorded {} stores", recorded);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StoreRegistry;
    use chrono::{Duration as ChronoDuration, Utc};

    #[tokio::test]
    async fn test_snapshot_task_records_periodically() {
        let registry = Arc::new(StoreRegistry::new());
        let store = registry.create_store("alice", "x", None, 1).await.unwrap();
        let recorder = Arc::new(AnalyticsRecorder::new(registry));

        let task = spawn_snapshot_task(recorder.clone(), 1);
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
        task.abort();

        let now = Utc::now();
        let history = recorder
            .query_range(store.id, now - ChronoDuration::hours(1), now)
            .await;
        assert!(history.len() >= 2, "expected two ticks, got {}", history.len());
    }
}
