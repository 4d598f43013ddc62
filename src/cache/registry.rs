//! Cache Registry Module
//!
//! Owns the per-volatility-class stores and routes invalidation from domain
//! operation names to key patterns. Write paths report what happened; the
//! router decides what gets purged, in every store that could hold affected
//! data.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, SharedStore, StoreSnapshot};
use crate::config::Config;

// == Invalidation Map ==
/// Domain operation → key patterns to purge. Defined once, never mutated.
///
/// Patterns match the function-name portion of cache keys (exact or
/// prefix), so one entry purges all parameterized variants of a read.
pub const OPERATION_PATTERNS: &[(&str, &[&str])] = &[
    ("meal_created", &["get_all_meals", "get_dashboard_stats"]),
    ("meal_updated", &["get_all_meals", "get_meal", "get_dashboard_stats"]),
    ("meal_archived", &["get_all_meals", "get_meal", "get_dashboard_stats"]),
    ("ingredient_created", &["get_all_ingredients", "get_dashboard_stats"]),
    (
        "ingredient_updated",
        &["get_all_ingredients", "get_ingredient", "get_all_meals", "get_dashboard_stats"],
    ),
    (
        "ingredient_archived",
        &["get_all_ingredients", "get_ingredient", "get_all_meals", "get_dashboard_stats"],
    ),
    ("condiment_saved", &["get_all_condiments", "get_dashboard_stats"]),
    ("dietary_tag_saved", &["get_dietary_tags", "get_all_meals"]),
    ("cook_verified", &["get_pending_cooks", "get_dashboard_stats"]),
    ("profile_updated", &["get_operator_profile"]),
    ("activity_logged", &["get_recent_activities"]),
];

// == Cache Registry ==
/// Application-lifetime owner of the three cache stores.
///
/// One store per volatility class: `reference` for rarely-changing lookup
/// data, `dynamic` for listings and aggregates, `user` for per-operator
/// data. Constructed explicitly and injected, so tests can build isolated
/// instances instead of sharing process-wide state.
#[derive(Debug)]
pub struct CacheRegistry {
    reference: SharedStore,
    dynamic: SharedStore,
    user: SharedStore,
}

impl CacheRegistry {
    // == Constructor ==
    pub fn new(config: &Config) -> Self {
        Self {
            reference: Arc::new(RwLock::new(CacheStore::new(
                "reference",
                config.reference_cache.max_entries,
                config.reference_cache.ttl(),
            ))),
            dynamic: Arc::new(RwLock::new(CacheStore::new(
                "dynamic",
                config.dynamic_cache.max_entries,
                config.dynamic_cache.ttl(),
            ))),
            user: Arc::new(RwLock::new(CacheStore::new(
                "user",
                config.user_cache.max_entries,
                config.user_cache.ttl(),
            ))),
        }
    }

    // == Store Accessors ==
    pub fn reference_store(&self) -> SharedStore {
        self.reference.clone()
    }

    pub fn dynamic_store(&self) -> SharedStore {
        self.dynamic.clone()
    }

    pub fn user_store(&self) -> SharedStore {
        self.user.clone()
    }

    // == Invalidate ==
    /// Routes a domain operation to its key patterns and purges them from
    /// every store.
    ///
    /// Unknown operations are a no-op: caching is an optimization, and a
    /// stale read is recoverable where a failed write path is not. The
    /// mismatch is still logged so typos in operation names surface.
    pub async fn invalidate(&self, operation: &str) {
        let Some(patterns) = Self::patterns_for(operation) else {
            warn!(operation, "ignoring unknown cache invalidation operation");
            return;
        };

        let purged = self.purge(patterns).await;
        debug!(operation, purged, "cache invalidation routed");
    }

    /// Looks up the pattern list for an operation name.
    pub fn patterns_for(operation: &str) -> Option<&'static [&'static str]> {
        OPERATION_PATTERNS
            .iter()
            .find(|(name, _)| *name == operation)
            .map(|(_, patterns)| *patterns)
    }

    // == Force Refresh ==
    /// Admin control: purges raw key patterns from every store so the next
    /// reads refetch. Returns the number of entries removed.
    pub async fn force_refresh<S: AsRef<str>>(&self, patterns: &[S]) -> usize {
        let purged = self.purge(patterns).await;
        info!(purged, "forced cache refresh");
        purged
    }

    // == Clear All ==
    /// Empties every store. Returns the number of entries removed.
    pub async fn clear_all(&self) -> usize {
        let mut cleared = self.reference.write().await.clear();
        cleared += self.dynamic.write().await.clear();
        cleared += self.user.write().await.clear();
        info!(cleared, "cleared all cache stores");
        cleared
    }

    // == Snapshots ==
    /// Read-only diagnostic snapshots of every store.
    pub async fn snapshots(&self) -> Vec<StoreSnapshot> {
        vec![
            self.reference.read().await.snapshot(),
            self.dynamic.read().await.snapshot(),
            self.user.read().await.snapshot(),
        ]
    }

    async fn purge<S: AsRef<str>>(&self, patterns: &[S]) -> usize {
        let mut purged = self.reference.write().await.invalidate(patterns);
        purged += self.dynamic.write().await.invalidate(patterns);
        purged += self.user.write().await.invalidate(patterns);
        purged
    }
}
