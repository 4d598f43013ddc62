//! Configuration Module
//!
//! Handles loading server and cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Sizing and TTL for one cache store.
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// Maximum number of live entries
    pub max_entries: usize,
    /// Default TTL in milliseconds
    pub ttl_ms: u64,
}

impl CacheParams {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    fn from_env(prefix: &str, defaults: CacheParams) -> Self {
        Self {
            max_entries: env::var(format!("{prefix}_CACHE_MAX_ENTRIES"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            ttl_ms: env::var(format!("{prefix}_CACHE_TTL_MS"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Rarely-changing reference data (dietary tags, condiments)
    pub reference_cache: CacheParams,
    /// Listings and aggregates (meals, ingredients, dashboard stats)
    pub dynamic_cache: CacheParams,
    /// Per-operator data (profiles)
    pub user_cache: CacheParams,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `REFERENCE_CACHE_MAX_ENTRIES` / `REFERENCE_CACHE_TTL_MS`
    ///   (defaults: 200 entries, 10 minutes)
    /// - `DYNAMIC_CACHE_MAX_ENTRIES` / `DYNAMIC_CACHE_TTL_MS`
    ///   (defaults: 500 entries, 2 minutes)
    /// - `USER_CACHE_MAX_ENTRIES` / `USER_CACHE_TTL_MS`
    ///   (defaults: 100 entries, 5 minutes)
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            reference_cache: CacheParams::from_env("REFERENCE", defaults.reference_cache),
            dynamic_cache: CacheParams::from_env("DYNAMIC", defaults.dynamic_cache),
            user_cache: CacheParams::from_env("USER", defaults.user_cache),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            reference_cache: CacheParams {
                max_entries: 200,
                ttl_ms: 600_000,
            },
            dynamic_cache: CacheParams {
                max_entries: 500,
                ttl_ms: 120_000,
            },
            user_cache: CacheParams {
                max_entries: 100,
                ttl_ms: 300_000,
            },
        }
    }
}
