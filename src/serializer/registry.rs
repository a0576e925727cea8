//! Serializer Registry Module
//!
//! An explicit, shareable name -> serializer table. Caches hold an `Arc` to
//! the registry they were built with and resolve their format name against
//! it each time they save or load.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::DEFAULT_SERIALIZER;
use crate::error::{CacheError, Result};
use crate::serializer::{BinarySerializer, JsonSerializer, Serializer};

// == Serializer Registry ==
pub struct SerializerRegistry {
    serializers: RwLock<HashMap<String, Arc<dyn Serializer>>>,
}

impl SerializerRegistry {
    // == Constructors ==
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            serializers: RwLock::new(HashMap::new()),
        }
    }

    /// A registry holding the builtin formats.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        let json: Arc<dyn Serializer> = Arc::new(JsonSerializer);
        let binary: Arc<dyn Serializer> = Arc::new(BinarySerializer);

        registry.register(DEFAULT_SERIALIZER, Some(json.clone()));
        registry.register("json", Some(json));
        registry.register("binary", Some(binary.clone()));
        registry.register("bincode", Some(binary));
        registry
    }

    // == Register ==
    /// Associates `name` with a serializer, or removes it when `None`.
    ///
    /// Last write wins. Returns whatever was registered under the name before.
    pub fn register(
        &self,
        name: impl Into<String>,
        serializer: Option<Arc<dyn Serializer>>,
    ) -> Option<Arc<dyn Serializer>> {
        let name = name.into();
        let mut serializers = self.serializers.write();
        match serializer {
            Some(serializer) => {
                debug!(serializer = %name, "registering serializer");
                serializers.insert(name, serializer)
            }
            None => {
                debug!(serializer = %name, "removing serializer");
                serializers.remove(&name)
            }
        }
    }

    // == Lookup ==
    pub fn get(&self, name: &str) -> Option<Arc<dyn Serializer>> {
        self.serializers.read().get(name).cloned()
    }

    /// Looks up a serializer for a save or load in progress.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Serializer>> {
        self.get(name)
            .ok_or_else(|| CacheError::SerializerNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.serializers.read().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.serializers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
