//! Cache Entry Module
//!
//! Defines a single keyed record inside a store, with TTL and access counters.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// TTL in seconds as given on the last write, None = no expiration
    pub ttl_seconds: Option<u64>,
    /// Absolute expiration time, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
    /// UTF-8 byte length of `value`
    pub size_bytes: usize,
    /// Number of successful reads
    pub hits: u64,
    /// Last successful read
    pub last_accessed: Option<DateTime<Utc>>,
    /// Caller-supplied metadata
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Insertion sequence, breaks ties between equal creation times
    pub(crate) seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - Optional TTL in seconds; `0` means no expiration
    /// * `metadata` - Optional caller metadata
    /// * `now` - Write time
    /// * `seq` - Insertion sequence assigned by the engine
    pub fn new(
        value: String,
        ttl_seconds: Option<u64>,
        metadata: Option<Value>,
        now: DateTime<Utc>,
        seq: u64,
    ) -> Self {
        let ttl_seconds = ttl_seconds.filter(|ttl| *ttl > 0);
        Self {
            size_bytes: value.len(),
            value,
            ttl_seconds,
            expires_at: expiry_from(ttl_seconds, now),
            hits: 0,
            last_accessed: None,
            metadata,
            created_at: now,
            updated_at: now,
            seq,
        }
    }

    // == Overwrite ==
    /// Replaces value, TTL and metadata in place.
    ///
    /// Hit counter, creation time and sequence are preserved.
    pub fn overwrite(
        &mut self,
        value: String,
        ttl_seconds: Option<u64>,
        metadata: Option<Value>,
        now: DateTime<Utc>,
    ) {
        let ttl_seconds = ttl_seconds.filter(|ttl| *ttl > 0);
        self.size_bytes = value.len();
        self.value = value;
        self.ttl_seconds = ttl_seconds;
        self.expires_at = expiry_from(ttl_seconds, now);
        self.metadata = metadata;
        self.updated_at = now;
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self, now: DateTime<Utc>) {
        self.hits += 1;
        self.last_accessed = Some(now);
    }

    // == Expires Within ==
    /// True if the entry expires in `[now, now + window)`.
    pub fn expires_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.expires_at {
            Some(expires) => expires >= now && expires < now + window,
            None => false,
        }
    }

    /// Builds the listing view of this entry.
    pub fn summary(&self, key: &str) -> EntrySummary {
        EntrySummary {
            key: key.to_string(),
            value: self.value.clone(),
            ttl_seconds: self.ttl_seconds,
            expires_at: self.expires_at,
            size_bytes: self.size_bytes,
            hits: self.hits,
            misses: 0,
            last_accessed: self.last_accessed,
            metadata: self.metadata.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// == Entry Summary ==
/// Serializable snapshot of an entry as returned by key listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub key: String,
    pub value: String,
    pub ttl_seconds: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub size_bytes: usize,
    pub hits: u64,
    /// Always 0: a miss has no live entry to land on, so misses are counted
    /// per store in [`crate::cache::StoreStats`]
    pub misses: u64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Utility Functions ==
/// A TTL too large to represent as a timestamp never expires.
fn expiry_from(ttl_seconds: Option<u64>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(ttl_seconds?).ok()?;
    Duration::try_seconds(secs).and_then(|ttl| now.checked_add_signed(ttl))
}
