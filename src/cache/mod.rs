//! Cache Module
//!
//! In-memory caching for the dashboard's data-access layer: bounded stores
//! with TTL expiration and LRU eviction, a memoizing wrapper with request
//! coalescing, and the registry that routes invalidation after writes.

use std::sync::Arc;

use tokio::sync::RwLock;

mod entry;
mod key;
mod memo;
mod recency;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{cache_key, function_name, KEY_SEPARATOR};
pub use memo::Memoized;
pub use recency::RecencyList;
pub use registry::{CacheRegistry, OPERATION_PATTERNS};
pub use stats::{CacheStats, EntrySnapshot, StoreSnapshot};
pub use store::CacheStore;

/// A store shared across the service and its memoized functions.
///
/// Store operations are synchronous under the lock and never suspend; the
/// only suspension point in a cached read is the wrapped fetch itself.
pub type SharedStore = Arc<RwLock<CacheStore>>;
