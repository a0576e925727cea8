//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction and
//! snapshot persistence.

mod builder;
mod entry;
mod handle;
mod listener;
mod lru;
mod snapshot;
mod stats;
mod store;
mod value;


// Re-export public types
pub use builder::CacheBuilder;
pub use entry::{CacheEntry, NO_EXPIRY};
pub use handle::Cache;
pub use listener::EvictionObserver;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use value::{FromValue, Value};
