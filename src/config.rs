//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::registry::DEFAULT_MAX_MEMORY_MB;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between expired-entry sweeps, 0 disables the sweeper
    pub cleanup_interval: u64,
    /// Seconds between automatic analytics snapshots, 0 disables them
    pub snapshot_interval: u64,
    /// Quota for stores created without `maxMemoryMB`
    pub default_max_memory_mb: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 30)
    /// - `SNAPSHOT_INTERVAL` - Snapshot frequency in seconds (default: 0, off)
    /// - `DEFAULT_MAX_MEMORY_MB` - Default store quota (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            snapshot_interval: env_or("SNAPSHOT_INTERVAL", defaults.snapshot_interval),
            default_max_memory_mb: env_or("DEFAULT_MAX_MEMORY_MB", defaults.default_max_memory_mb),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 30,
            snapshot_interval: 0,
            default_max_memory_mb: DEFAULT_MAX_MEMORY_MB,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
