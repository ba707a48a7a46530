//! Analytics Module
//!
//! Immutable per-store counter snapshots and the periods used to query them.

mod period;
mod recorder;

pub use period::Period;
pub use recorder::{AnalyticsRecorder, AnalyticsSnapshot};
