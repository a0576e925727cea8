//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

/// Default maximum number of resident entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default serializer name (textual JSON format).
pub const DEFAULT_SERIALIZER: &str = "default";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Validation against a serializer registry happens in
/// [`CacheBuilder::build`](crate::cache::CacheBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries before LRU eviction kicks in
    pub capacity: usize,
    /// Serializer used by save/load
    pub serializer: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LCACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LCACHE_SERIALIZER` - Snapshot format name (default: "default")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            capacity: lookup("LCACHE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(DEFAULT_CAPACITY),
            serializer: lookup("LCACHE_SERIALIZER")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SERIALIZER.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            serializer: DEFAULT_SERIALIZER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.serializer, "default");
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_from_lookup_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("LCACHE_CAPACITY", "64"),
            ("LCACHE_SERIALIZER", "binary"),
        ]));
        assert_eq!(config.capacity, 64);
        assert_eq!(config.serializer, "binary");
    }

    #[test]
    fn test_config_from_lookup_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("LCACHE_CAPACITY", "lots"),
            ("LCACHE_SERIALIZER", "  "),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_lookup(lookup_from(&[("LCACHE_CAPACITY", "0")]));
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }
}
