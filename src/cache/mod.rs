//! Cache Module
//!
//! Per-store in-memory caching with lazy TTL expiration, hit/miss counters
//! and memory accounting.

mod engine;
mod entry;
mod stats;


// Re-export public types
pub use engine::{CacheEngine, Lookup};
pub use entry::{CacheEntry, EntrySummary};
pub use stats::{hit_rate_percent, StoreStats};

// == Public Constants ==
/// Maximum number of entries returned by a key listing
pub const LIST_LIMIT: usize = 100;

/// Window used for the "expiring soon" counter
pub const EXPIRING_WINDOW_SECS: i64 = 60 * 60;

/// Bytes per configured megabyte of quota
pub const BYTES_PER_MB: u64 = 1024 * 1024;
