//! lcache - An in-process key/value cache
//!
//! Provides per-entry TTL expiration, bounded capacity with LRU eviction and
//! optional snapshot persistence to a single file.
//!
//! ```
//! use std::time::Duration;
//! use lcache::{Cache, Value, NO_EXPIRY};
//!
//! let cache = Cache::builder().capacity(2).build().unwrap();
//! cache.set("a", 1, Duration::from_secs(60));
//! cache.set("b", "two", NO_EXPIRY);
//!
//! assert_eq!(cache.get("a"), Some(Value::Int(1)));
//! assert_eq!(cache.get_as::<String>("b").as_deref(), Some("two"));
//! ```
//!
//! Expired entries are reaped lazily by reads; there is no background sweeper.

pub mod cache;
pub mod config;
pub mod error;
pub mod serializer;
pub mod time;

pub use cache::{
    Cache, CacheBuilder, CacheEntry, CacheStats, EvictionObserver, FromValue, Value, NO_EXPIRY,
};
pub use config::Config;
pub use error::{CacheError, ConfigError, Result};
pub use serializer::{BinarySerializer, JsonSerializer, Serializer, SerializerRegistry, Snapshot};
pub use time::{Clock, ManualClock, SystemClock};
