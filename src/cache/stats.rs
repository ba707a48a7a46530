//! Cache Statistics Module
//!
//! Aggregate counters for one store and the derived rates shown to callers.

use serde::Serialize;

// == Store Stats ==
/// Point-in-time aggregate of a store's entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Number of stored entries (including expired ones not yet read or swept)
    pub key_count: usize,
    /// Sum of the stored entries' hit counters
    pub total_hits: u64,
    /// Store-level miss counter
    pub total_misses: u64,
    /// Sum of the stored entries' sizes
    pub memory_used_bytes: u64,
    /// Entries expiring inside the requested window
    pub expiring_within: usize,
}

impl StoreStats {
    // == Hit Rate ==
    /// Hit rate as a percentage rounded to 2 decimals, 0 with no lookups.
    pub fn hit_rate(&self) -> f64 {
        hit_rate_percent(self.total_hits, self.total_misses)
    }

    // == Memory Usage ==
    /// Share of `max_memory_bytes` in use, as a percentage rounded to 2 decimals.
    pub fn memory_usage_percent(&self, max_memory_bytes: u64) -> f64 {
        if max_memory_bytes == 0 {
            return 0.0;
        }
        round2(self.memory_used_bytes as f64 / max_memory_bytes as f64 * 100.0)
    }
}

/// `hits / (hits + misses) * 100`, rounded to 2 decimals.
pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        round2(hits as f64 / total as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
