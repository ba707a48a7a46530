//! Registry Module
//!
//! Named stores, their quotas and owners.

mod store;
mod store_registry;

pub use store::{Store, StoreHandle, StoreSummary};
pub use store_registry::StoreRegistry;

/// Quota applied to stores created without an explicit one
pub const DEFAULT_MAX_MEMORY_MB: u64 = 100;
