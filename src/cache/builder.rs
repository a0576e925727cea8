//! Cache Builder Module
//!
//! Two-phase construction: collect options, then validate them against the
//! chosen serializer registry before any cache exists.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, CacheStore, EvictionObserver};
use crate::config::Config;
use crate::error::ConfigError;
use crate::serializer::SerializerRegistry;
use crate::time::{Clock, SystemClock};

// == Cache Builder ==
/// Builds a [`Cache`].
///
/// Defaults: capacity 1000, serializer `"default"`, no observer, the builtin
/// serializer registry and the system clock.
pub struct CacheBuilder {
    config: Config,
    observer: Option<Arc<dyn EvictionObserver>>,
    registry: Option<Arc<SerializerRegistry>>,
    clock: Arc<dyn Clock>,
}

impl CacheBuilder {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Seeds the builder from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
            observer: None,
            registry: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Maximum resident entries before LRU eviction.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Snapshot format name; must be registered when `build` runs.
    pub fn serializer(mut self, name: impl Into<String>) -> Self {
        self.config.serializer = name.into();
        self
    }

    pub fn eviction_observer(mut self, observer: impl EvictionObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Resolves formats against `registry` instead of a private builtin one.
    pub fn registry(mut self, registry: Arc<SerializerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // == Build ==
    /// Validates the options and creates the cache.
    ///
    /// # Errors
    /// - [`ConfigError::ZeroCapacity`] if capacity is 0
    /// - [`ConfigError::UnknownSerializer`] if the serializer name is not registered
    pub fn build(self) -> Result<Cache, ConfigError> {
        if self.config.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(SerializerRegistry::with_builtins()));
        if !registry.contains(&self.config.serializer) {
            return Err(ConfigError::UnknownSerializer(self.config.serializer));
        }

        info!(
            capacity = self.config.capacity,
            serializer = %self.config.serializer,
            "cache created"
        );

        let store = CacheStore::new(
            self.config.capacity,
            self.config.serializer,
            self.observer,
            self.clock,
        );
        Ok(Cache::from_parts(store, registry))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CacheBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.config.capacity)
            .field("serializer", &self.config.serializer)
            .field("has_observer", &self.observer.is_some())
            .field("has_registry", &self.registry.is_some())
            .finish_non_exhaustive()
    }
}
