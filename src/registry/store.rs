//! Store Module
//!
//! A named cache namespace and the handle that pairs it with its engine.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cache::{CacheEngine, BYTES_PER_MB, EXPIRING_WINDOW_SECS};

// == Store ==
/// Identity and quota of a store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    /// Owner; store names are unique per owner
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Memory quota in megabytes
    #[serde(rename = "maxMemoryMB")]
    pub max_memory_mb: u64,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl Store {
    /// Quota in bytes.
    pub fn max_memory_bytes(&self) -> u64 {
        self.max_memory_mb.saturating_mul(BYTES_PER_MB)
    }
}

// == Store Handle ==
/// A store together with its entries, each guarded by its own lock.
#[derive(Debug)]
pub struct StoreHandle {
    pub store: Store,
    pub cache: RwLock<CacheEngine>,
}

impl StoreHandle {
    pub fn new(store: Store) -> Self {
        let cache = RwLock::new(CacheEngine::new(store.max_memory_bytes()));
        Self { store, cache }
    }

    pub fn id(&self) -> Uuid {
        self.store.id
    }

    /// Store identity plus derived stats, as shown in store listings.
    pub async fn summary(&self) -> StoreSummary {
        let stats = self
            .cache
            .read()
            .await
            .stats(Duration::seconds(EXPIRING_WINDOW_SECS));

        StoreSummary {
            id: self.store.id,
            name: self.store.name.clone(),
            description: self.store.description.clone(),
            key_count: stats.key_count,
            total_hits: stats.total_hits,
            total_misses: stats.total_misses,
            hit_rate: stats.hit_rate(),
            memory_used: stats.memory_used_bytes,
            max_memory_mb: self.store.max_memory_mb,
            created_at: self.store.created_at,
        }
    }
}

// == Store Summary ==
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub key_count: usize,
    pub total_hits: u64,
    pub total_misses: u64,
    /// Percentage, 2 decimals
    pub hit_rate: f64,
    /// Bytes
    pub memory_used: u64,
    #[serde(rename = "maxMemoryMB")]
    pub max_memory_mb: u64,
    pub created_at: DateTime<Utc>,
}
