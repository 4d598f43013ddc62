//! Pinggang Cache - the read-side caching layer of the Pinggang meal-curation
//! dashboard.
//!
//! Provides a bounded in-memory cache with TTL expiration and LRU eviction,
//! a memoizing wrapper with request coalescing for backend fetch functions,
//! and an invalidation router that write operations notify after mutating
//! backend state.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use api::AppState;
pub use cache::CacheRegistry;
pub use catalog::CatalogService;
pub use config::Config;
