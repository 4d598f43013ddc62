//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with recency tracking and TTL
//! expiration. Expiration is lazy: entries are checked when read, not swept
//! by a timer.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::key::function_name;
use crate::cache::{CacheEntry, CacheStats, EntrySnapshot, RecencyList, StoreSnapshot};

// == Cache Store ==
/// One named pool of memoized values with a shared capacity bound and
/// default TTL. The dashboard keeps one store per volatility class.
#[derive(Debug)]
pub struct CacheStore {
    /// Volatility-class name, used in logs and snapshots
    name: &'static str,
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Access-order tracker for eviction
    recency: RecencyList,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of live entries
    max_entries: usize,
    /// TTL applied when a caller does not specify one
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new store.
    ///
    /// # Arguments
    /// * `name` - Volatility-class label ("reference", "dynamic", "user")
    /// * `max_entries` - Capacity bound; inserting beyond it evicts the LRU entry
    /// * `default_ttl` - TTL used when `set` is called without one
    pub fn new(name: &'static str, max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the cached value for `key` if present and unexpired.
    ///
    /// An expired entry is removed on the spot and counted as a miss. A hit
    /// refreshes the entry's recency so it is not the next eviction
    /// candidate.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.recency.forget(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.recency.record_use(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites an entry. Never fails.
    ///
    /// Overwriting resets the TTL. When a *new* key would push the store
    /// past `max_entries`, the least recently used entry is evicted first.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<Duration>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.recency.pop_least_used() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(store = self.name, key = %evicted, "evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.recency.record_use(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate ==
    /// Removes every entry whose function-name portion matches one of the
    /// patterns (exact match or prefix). Returns the number purged.
    ///
    /// Patterns name logical operation groupings, not regexes; matching
    /// against the name portion lets one pattern purge all parameterized
    /// variants of a read function.
    pub fn invalidate<S: AsRef<str>>(&mut self, patterns: &[S]) -> usize {
        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|key| {
                let name = function_name(key);
                patterns
                    .iter()
                    .any(|p| name == p.as_ref() || name.starts_with(p.as_ref()))
            })
            .cloned()
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            self.recency.forget(key);
        }

        self.stats.record_invalidations(doomed.len());
        self.stats.set_total_entries(self.entries.len());

        if !doomed.is_empty() {
            debug!(store = self.name, purged = doomed.len(), "invalidated cache entries");
        }
        doomed.len()
    }

    // == Clear ==
    /// Removes all entries unconditionally. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        while self.recency.pop_least_used().is_some() {}
        self.stats.set_total_entries(0);
        removed
    }

    // == Snapshot ==
    /// Read-only diagnostic view of the store.
    ///
    /// Does not refresh recency and does not purge expired entries, so the
    /// debug panel can poll it without disturbing cache behavior.
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());

        StoreSnapshot {
            name: self.name.to_string(),
            size: self.entries.len(),
            max_entries: self.max_entries,
            stats,
            entries: self
                .entries
                .iter()
                .map(|(key, entry)| EntrySnapshot {
                    key: key.clone(),
                    is_expired: entry.is_expired(),
                    age_ms: entry.age_ms(),
                })
                .collect(),
        }
    }

    // == Stats ==
    /// Returns current performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
