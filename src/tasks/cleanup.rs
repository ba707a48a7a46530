//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from every store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::registry::StoreRegistry;

/// Spawns a background task that periodically sweeps expired entries.
///
/// Each store is locked on its own, one at a time, so a sweep never holds
/// more than one store lock. Reads still expire entries lazily between
/// sweeps.
///
/// # Arguments
/// * `registry` - Shared store registry
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    registry: Arc<StoreRegistry>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = sweep_expired(&registry).await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

/// Removes expired entries from every store. Returns the total removed.
pub async fn sweep_expired(registry: &StoreRegistry) -> usize {
    let mut removed = 0;
    for handle in registry.handles().await {
        let count = handle.cache.write().await.cleanup_expired();
        if count > 0 {
            debug!("Swept {} entries from store {}", count, handle.id());
        }
        removed += count;
    }
    removed
}
