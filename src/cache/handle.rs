//! Cache Handle Module
//!
//! The thread-safe public face of the engine. One `parking_lot` mutex guards
//! the whole store; every operation, reads included, takes it exclusively
//! because reads move keys in the recency list and may reap expired entries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::cache::{CacheBuilder, CacheStats, CacheStore, EvictionObserver, FromValue, Value};
use crate::error::ConfigError;
use crate::serializer::SerializerRegistry;

// == Cache ==
/// An in-process key/value cache with TTL expiration and LRU eviction.
///
/// Cloning is cheap and yields a handle to the same cache. Caches built
/// separately share nothing.
#[derive(Debug, Clone)]
pub struct Cache {
    pub(crate) store: Arc<Mutex<CacheStore>>,
    pub(crate) registry: Arc<SerializerRegistry>,
}

impl Cache {
    pub(crate) fn from_parts(store: CacheStore, registry: Arc<SerializerRegistry>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            registry,
        }
    }

    /// Starts a [`CacheBuilder`].
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock()
    }

    // == Single-key Operations ==
    /// Inserts or replaces `key`.
    ///
    /// A zero `ttl` ([`NO_EXPIRY`](crate::cache::NO_EXPIRY)) never expires.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>, ttl: Duration) {
        self.lock().set(key.into(), value.into(), ttl);
    }

    /// Returns the live value for `key`, refreshing its recency.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key)
    }

    /// Like [`get`](Self::get) with a checked conversion; a type mismatch reads as `None`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|value| T::from_value(&value))
    }

    /// Whether `key` is physically stored, expired or not.
    pub fn has(&self, key: &str) -> bool {
        self.lock().has(key)
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.lock().delete(key)
    }

    // == Batch Operations ==
    pub fn mget<I, K>(&self, keys: I) -> HashMap<String, Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.lock().mget(keys)
    }

    pub fn mset<I, K, V>(&self, items: I, ttl: Duration)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.lock()
            .mset(items.into_iter().map(|(k, v)| (k.into(), v.into())), ttl);
    }

    // == Scans ==
    /// Live keys, most recently used first.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    /// Stored entry count, including expired entries not yet reaped.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops everything. The eviction observer is not called.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // == Reconfiguration ==
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Changes the capacity, evicting least recently used entries if needed.
    pub fn set_capacity(&self, capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        self.lock().set_capacity(capacity);
        Ok(())
    }

    pub fn serializer_name(&self) -> String {
        self.lock().serializer().to_string()
    }

    /// Switches the snapshot format. The name must be registered now.
    pub fn set_serializer(&self, name: &str) -> Result<(), ConfigError> {
        if !self.registry.contains(name) {
            return Err(ConfigError::UnknownSerializer(name.to_string()));
        }
        self.lock().set_serializer(name.to_string());
        Ok(())
    }

    pub fn set_eviction_observer(&self, observer: Option<Arc<dyn EvictionObserver>>) {
        self.lock().set_observer(observer);
    }

    /// The registry this cache resolves formats against.
    pub fn registry(&self) -> &Arc<SerializerRegistry> {
        &self.registry
    }
}
