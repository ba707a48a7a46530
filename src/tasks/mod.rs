//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired entries from every store
//! - Snapshots: Records analytics for every store

mod cleanup;
mod snapshot;

pub use cleanup::{spawn_cleanup_task, sweep_expired};
pub use snapshot::spawn_snapshot_task;
