//! Cache Engine Module
//!
//! Per-store key/value storage with lazy TTL expiration, hit/miss accounting
//! and incremental memory tracking.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::cache::{CacheEntry, EntrySummary, StoreStats};

// == Lookup ==
/// Outcome of a read. A miss is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Hit {
        value: String,
        metadata: Option<Value>,
    },
    Miss {
        /// The entry existed but its TTL had elapsed; it was removed by this read.
        expired: bool,
    },
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit { .. })
    }
}

// == Cache Engine ==
/// Storage for a single store's entries.
///
/// Quota is tracked but never enforced: writes are always admitted and
/// callers check [`CacheEngine::is_over_quota`] to report overflow.
#[derive(Debug)]
pub struct CacheEngine {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Store-level miss counter
    misses: u64,
    /// Running sum of entry sizes
    memory_used: u64,
    /// Configured quota in bytes
    max_memory_bytes: u64,
    /// Next insertion sequence number
    next_seq: u64,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an empty engine with the given memory quota.
    pub fn new(max_memory_bytes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            misses: 0,
            memory_used: 0,
            max_memory_bytes,
            next_seq: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A present entry whose TTL has elapsed is removed and reported as an
    /// expired miss. Every miss bumps the store miss counter; every hit bumps
    /// the entry hit counter and its last-accessed time.
    pub fn get(&mut self, key: &str) -> Lookup {
        self.get_at(key, Utc::now())
    }

    pub(crate) fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Lookup {
        let expired = match self.entries.get_mut(key) {
            None => false,
            Some(entry) if entry.is_expired_at(now) => true,
            Some(entry) => {
                entry.record_hit(now);
                return Lookup::Hit {
                    value: entry.value.clone(),
                    metadata: entry.metadata.clone(),
                };
            }
        };

        if expired {
            self.remove_entry(key);
        }
        self.misses += 1;
        Lookup::Miss { expired }
    }

    // == Set ==
    /// Upserts a key. Returns the absolute expiry, if any.
    ///
    /// A TTL of `None` or `0` stores the entry without expiry. Overwriting an
    /// existing key keeps its hit counter and creation time.
    pub fn set(
        &mut self,
        key: String,
        value: String,
        ttl_seconds: Option<u64>,
        metadata: Option<Value>,
    ) -> Option<DateTime<Utc>> {
        self.set_at(key, value, ttl_seconds, metadata, Utc::now())
    }

    pub(crate) fn set_at(
        &mut self,
        key: String,
        value: String,
        ttl_seconds: Option<u64>,
        metadata: Option<Value>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let new_size = value.len() as u64;

        if let Some(entry) = self.entries.get_mut(&key) {
            self.memory_used -= entry.size_bytes as u64;
            entry.overwrite(value, ttl_seconds, metadata, now);
            self.memory_used += new_size;
            return entry.expires_at;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = CacheEntry::new(value, ttl_seconds, metadata, now, seq);
        let expires_at = entry.expires_at;
        self.entries.insert(key, entry);
        self.memory_used += new_size;
        expires_at
    }

    // == Delete ==
    /// Removes an entry by key. Returns the number removed (0 or 1).
    pub fn delete(&mut self, key: &str) -> usize {
        usize::from(self.remove_entry(key).is_some())
    }

    // == Delete By Pattern ==
    /// Removes every entry whose key contains `pattern` as a substring.
    pub fn delete_by_pattern(&mut self, pattern: &str) -> usize {
        self.remove_where(|key, _| key.contains(pattern))
    }

    // == Flush ==
    /// Removes every entry in the store.
    pub fn flush(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.memory_used = 0;
        count
    }

    // == List ==
    /// Lists entries newest-created first, optionally filtered by substring.
    pub fn list(&self, pattern: Option<&str>, limit: usize) -> Vec<EntrySummary> {
        let mut matched: Vec<(&String, &CacheEntry)> = self
            .entries
            .iter()
            .filter(|(key, _)| pattern.map_or(true, |p| key.contains(p)))
            .collect();

        matched.sort_by(|(_, a), (_, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        matched
            .into_iter()
            .take(limit)
            .map(|(key, entry)| entry.summary(key))
            .collect()
    }

    // == Stats ==
    /// Aggregates the store, counting entries that expire within `window`.
    pub fn stats(&self, window: Duration) -> StoreStats {
        self.stats_at(window, Utc::now())
    }

    pub(crate) fn stats_at(&self, window: Duration, now: DateTime<Utc>) -> StoreStats {
        StoreStats {
            key_count: self.entries.len(),
            total_hits: self.entries.values().map(|entry| entry.hits).sum(),
            total_misses: self.misses,
            memory_used_bytes: self.memory_used,
            expiring_within: self
                .entries
                .values()
                .filter(|entry| entry.expires_within(now, window))
                .count(),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    ///
    /// Sweeping does not touch the miss counter.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    pub(crate) fn cleanup_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        self.remove_where(|_, entry| entry.is_expired_at(now))
    }

    // == Quota ==
    pub fn max_memory_bytes(&self) -> u64 {
        self.max_memory_bytes
    }

    pub fn memory_used_bytes(&self) -> u64 {
        self.memory_used
    }

    /// True once stored bytes exceed the configured quota.
    pub fn is_over_quota(&self) -> bool {
        self.memory_used > self.max_memory_bytes
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.memory_used -= entry.size_bytes as u64;
        Some(entry)
    }

    fn remove_where(&mut self, mut pred: impl FnMut(&str, &CacheEntry) -> bool) -> usize {
        let mut removed = 0;
        let mut freed = 0u64;
        self.entries.retain(|key, entry| {
            if pred(key, entry) {
                removed += 1;
                freed += entry.size_bytes as u64;
                false
            } else {
                true
            }
        });
        self.memory_used -= freed;
        removed
    }
}
