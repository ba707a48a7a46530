//! Shared application state.

use std::sync::Arc;

use uuid::Uuid;

use crate::analytics::AnalyticsRecorder;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::registry::{StoreHandle, StoreRegistry};

/// Application state shared across all handlers and background tasks.
#[derive(Clone)]
pub struct AppState {
    /// All stores and their entries
    pub registry: Arc<StoreRegistry>,
    /// Snapshot history
    pub analytics: Arc<AnalyticsRecorder>,
    /// Quota for stores created without one
    pub default_max_memory_mb: u64,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: Arc<StoreRegistry>, default_max_memory_mb: u64) -> Self {
        let analytics = Arc::new(AnalyticsRecorder::new(registry.clone()));
        Self {
            registry,
            analytics,
            default_max_memory_mb,
        }
    }

    /// Creates an empty AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(StoreRegistry::new()), config.default_max_memory_mb)
    }

    /// Resolves a store id as sent by a client.
    ///
    /// Ids that do not parse cannot name a store, so they are `NotFound`.
    pub async fn store(&self, raw_id: &str) -> Result<Arc<StoreHandle>> {
        let id = parse_store_id(raw_id)?;
        self.registry.get_store(id).await
    }
}

pub fn parse_store_id(raw_id: &str) -> Result<Uuid> {
    Uuid::parse_str(raw_id).map_err(|_| CacheError::store_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_lookup() {
        let state = AppState::from_config(&Config::default());
        let store = state
            .registry
            .create_store("alice", "x", None, 1)
            .await
            .unwrap();

        let handle = state.store(&store.id.to_string()).await.unwrap();
        assert_eq!(handle.id(), store.id);

        assert!(matches!(
            state.store("not-a-uuid").await,
            Err(CacheError::NotFound(_))
        ));
        assert!(matches!(
            state.store(&Uuid::new_v4().to_string()).await,
            Err(CacheError::NotFound(_))
        ));
    }
}
