//! Cache Statistics Module
//!
//! Performance counters plus the read-only diagnostic snapshot served to the
//! operator debug panel.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance counters for one store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful cache retrievals
    pub hits: u64,
    /// Failed retrievals (key absent or expired)
    pub misses: u64,
    /// Entries removed by the LRU capacity bound
    pub evictions: u64,
    /// Entries removed by pattern invalidation
    pub invalidations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Snapshots ==
/// Per-entry view inside a [`StoreSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    pub is_expired: bool,
    pub age_ms: u64,
}

/// Read-only view of one store for the debug panel.
///
/// Taking a snapshot must never mutate the store: no recency refresh and no
/// purging of expired entries, so the panel can poll it freely.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    /// Volatility-class name of the store ("reference", "dynamic", "user")
    pub name: String,
    pub size: usize,
    pub max_entries: usize,
    pub stats: CacheStats,
    pub entries: Vec<EntrySnapshot>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_invalidations_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_invalidations(3);
        stats.record_invalidations(2);
        assert_eq!(stats.invalidations, 5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = StoreSnapshot {
            name: "dynamic".to_string(),
            size: 1,
            max_entries: 500,
            stats: CacheStats::new(),
            entries: vec![EntrySnapshot {
                key: "get_all_meals:null".to_string(),
                is_expired: false,
                age_ms: 12,
            }],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("get_all_meals:null"));
        assert!(json.contains("max_entries"));
    }
}
