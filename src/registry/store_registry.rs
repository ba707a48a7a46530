//! Store Registry Module
//!
//! Owns every store, enforces per-owner name uniqueness and hands out
//! store handles to request handlers and background tasks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{CacheError, Result};
use crate::registry::{Store, StoreHandle, StoreSummary};

// == Store Registry ==
/// Thread-safe set of stores keyed by id.
///
/// The map lock is held only while looking up or mutating the set of stores;
/// entry operations go through the per-store lock on [`StoreHandle::cache`].
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<Uuid, Arc<StoreHandle>>>,
    next_seq: AtomicU64,
}

impl StoreRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Create Store ==
    /// Registers a new store for `user_id`.
    ///
    /// Fails with `Conflict` if the owner already has a store of that name.
    pub async fn create_store(
        &self,
        user_id: &str,
        name: &str,
        description: Option<String>,
        max_memory_mb: u64,
    ) -> Result<Store> {
        let mut stores = self.stores.write().await;

        if stores
            .values()
            .any(|handle| handle.store.user_id == user_id && handle.store.name == name)
        {
            return Err(CacheError::Conflict("Store name already exists".to_string()));
        }

        let id = Uuid::new_v4();
        if stores.contains_key(&id) {
            return Err(CacheError::Internal(format!("store id collision: {id}")));
        }

        let store = Store {
            id,
            user_id: user_id.to_string(),
            name: name.to_string(),
            description,
            max_memory_mb,
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        stores.insert(id, Arc::new(StoreHandle::new(store.clone())));

        info!("Created store '{}' ({}) for {}", store.name, store.id, user_id);
        Ok(store)
    }

    // == Delete Store ==
    /// Removes a store and, with it, all of its entries.
    pub async fn delete_store(&self, id: Uuid) -> Result<()> {
        let removed = self.stores.write().await.remove(&id);
        match removed {
            Some(handle) => {
                info!("Deleted store '{}' ({})", handle.store.name, id);
                Ok(())
            }
            None => Err(CacheError::store_not_found()),
        }
    }

    // == Get Store ==
    pub async fn get_store(&self, id: Uuid) -> Result<Arc<StoreHandle>> {
        self.stores
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(CacheError::store_not_found)
    }

    // == List Stores ==
    /// Lists an owner's stores newest first, with derived stats.
    pub async fn list_stores(&self, user_id: &str) -> Vec<StoreSummary> {
        let mut owned: Vec<Arc<StoreHandle>> = self
            .stores
            .read()
            .await
            .values()
            .filter(|handle| handle.store.user_id == user_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| {
            b.store
                .created_at
                .cmp(&a.store.created_at)
                .then_with(|| b.store.seq.cmp(&a.store.seq))
        });

        let mut summaries = Vec::with_capacity(owned.len());
        for handle in owned {
            summaries.push(handle.summary().await);
        }
        summaries
    }

    // == Handles ==
    /// Every live store, in no particular order.
    pub async fn handles(&self) -> Vec<Arc<StoreHandle>> {
        self.stores.read().await.values().cloned().collect()
    }

    /// True while `id` names a live store.
    ///
    /// Callers holding a store's cache lock use this to tell whether the store
    /// was deleted while they waited for it.
    pub async fn contains(&self, id: Uuid) -> bool {
        self.stores.read().await.contains_key(&id)
    }
}
