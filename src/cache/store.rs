//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.
//!
//! `CacheStore` is not synchronized; [`Cache`](crate::cache::Cache) wraps it
//! in a mutex. Every method here assumes exclusive access.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, EvictionObserver, LruTracker, Value};
use crate::serializer::Snapshot;
use crate::time::Clock;

/// Why an entry is leaving the store one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemovalCause {
    Evicted,
    Expired,
    Deleted,
}

// == Cache Store ==
/// Entry storage, recency order and capacity policy.
///
/// `entries` and `lru` always hold the same key set between calls.
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Usage counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Snapshot format name, resolved at save/load time
    serializer: String,
    observer: Option<Arc<dyn EvictionObserver>>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. Callers validate `capacity` and `serializer`.
    pub(crate) fn new(
        capacity: usize,
        serializer: String,
        observer: Option<Arc<dyn EvictionObserver>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            serializer,
            observer,
            clock,
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// An existing key has its value and expiry replaced and moves to the
    /// front; capacity is not re-checked. A new key arriving at capacity
    /// evicts exactly one least recently used entry first.
    pub fn set(&mut self, key: String, value: Value, ttl: Duration) {
        let now = self.now_ms();
        self.set_at(key, value, ttl, now);
    }

    fn set_at(&mut self, key: String, value: Value, ttl: Duration, now: i64) {
        let entry = CacheEntry::new(value, ttl, now);

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = entry;
            self.lru.touch(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict();
        }

        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Multi Set ==
    /// Stores every pair with one shared TTL, computed from a single "now".
    pub fn mset<I>(&mut self, items: I, ttl: Duration)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let now = self.now_ms();
        for (key, value) in items {
            self.set_at(key, value, ttl, now);
        }
    }

    // == Get ==
    /// Retrieves a live value and marks it most recently used.
    ///
    /// An expired entry is removed on the way (the observer fires) and
    /// reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.now_ms();
        self.get_at(key, now)
    }

    fn get_at(&mut self, key: &str, now: i64) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(key, RemovalCause::Expired);
            self.stats.record_miss();
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Multi Get ==
    /// Looks up every key against one shared "now".
    ///
    /// Missing or expired keys map to `None`.
    pub fn mget<I, K>(&mut self, keys: I) -> HashMap<String, Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let now = self.now_ms();
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), self.get_at(key, now))
            })
            .collect()
    }

    // == Has ==
    /// Whether the key is physically stored.
    ///
    /// Expiry is deliberately ignored: a zombie entry still answers `true`.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Keys ==
    /// Live keys, most recently used first.
    ///
    /// A full O(n) scan against one "now". Does not touch recency and does
    /// not reap the expired entries it skips.
    pub fn keys(&self) -> Vec<String> {
        let now = self.now_ms();
        self.lru
            .iter()
            .filter(|key| {
                self.entries
                    .get(*key)
                    .is_some_and(|entry| !entry.is_expired(now))
            })
            .map(str::to_string)
            .collect()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet reaped.
    ///
    /// O(1); may be larger than `keys().len()`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key, RemovalCause::Deleted)
    }

    // == Clear ==
    /// Drops every entry without notifying the observer.
    pub fn clear(&mut self) {
        self.entries = HashMap::new();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Evict ==
    /// Removes the least recently used entry, if any.
    fn evict(&mut self) -> bool {
        match self.lru.evict_oldest() {
            Some(victim) => self.remove(&victim, RemovalCause::Evicted),
            None => false,
        }
    }

    fn remove(&mut self, key: &str, cause: RemovalCause) -> bool {
        let tracked = self.lru.remove(key);
        let Some(entry) = self.entries.remove(key) else {
            return tracked;
        };

        match cause {
            RemovalCause::Evicted => self.stats.record_eviction(),
            RemovalCause::Expired => self.stats.record_expiration(),
            RemovalCause::Deleted => self.stats.record_deletion(),
        }
        self.stats.set_total_entries(self.entries.len());
        debug!(key, ?cause, "cache entry removed");

        if let Some(observer) = &self.observer {
            observer.on_evict(key.to_string(), entry.value);
        }
        true
    }

    // == Configuration ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting LRU entries until the store fits.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > self.capacity {
            if !self.evict() {
                break;
            }
        }
    }

    pub fn serializer(&self) -> &str {
        &self.serializer
    }

    pub(crate) fn set_serializer(&mut self, serializer: String) {
        self.serializer = serializer;
    }

    pub(crate) fn set_observer(&mut self, observer: Option<Arc<dyn EvictionObserver>>) {
        self.observer = observer;
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Snapshot Support ==
    /// Copies every entry still live at `now`. The store itself is untouched.
    pub(crate) fn live_snapshot(&self, now: i64) -> Snapshot {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    /// Replaces the contents with the live part of `snapshot`.
    ///
    /// Recency follows the snapshot's iteration order. Entries past
    /// capacity are dropped. Returns the number restored.
    pub(crate) fn restore(&mut self, snapshot: Snapshot, now: i64) -> usize {
        self.clear();

        let mut dropped = 0usize;
        for (key, entry) in snapshot {
            if entry.is_expired(now) {
                continue;
            }
            if self.entries.len() >= self.capacity {
                dropped += 1;
                continue;
            }
            self.lru.touch(&key);
            self.entries.insert(key, entry);
        }

        if dropped > 0 {
            warn!(dropped, capacity = self.capacity, "snapshot larger than capacity");
        }
        self.stats.set_total_entries(self.entries.len());
        self.entries.len()
    }

    /// Every stored key, zombies included, most recent first.
    #[cfg(test)]
    pub(crate) fn stored_keys(&self) -> Vec<String> {
        self.lru.iter().map(str::to_string).collect()
    }

    /// Sizes of the entry map, the key index, the arena and a list walk.
    #[cfg(test)]
    pub(crate) fn structure_sizes(&self) -> (usize, usize, usize, usize) {
        let (index, arena, walk) = self.lru.structure_sizes();
        (self.entries.len(), index, arena, walk)
    }
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("serializer", &self.serializer)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
