//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::Value;
use crate::time::duration_to_ms;

/// TTL meaning "never expires".
pub const NO_EXPIRY: Duration = Duration::ZERO;

// == Cache Entry ==
/// A single cached value plus its absolute expiry.
///
/// On the wire this is `{ "value": .., "expiry": <unix ms, 0 = never> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    #[serde(rename = "expiry", with = "expiry_millis")]
    pub expires_at: Option<i64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now_ms`.
    ///
    /// A zero TTL yields an entry that never expires.
    pub fn new(value: Value, ttl: Duration, now_ms: i64) -> Self {
        let expires_at = (!ttl.is_zero()).then(|| now_ms.saturating_add(duration_to_ms(ttl)));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// Expiry is strict: an entry is still live at exactly `expires_at`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms > expires,
            None => false,
        }
    }
}

/// `Option<i64>` <-> `i64` with `0` as the "never" sentinel.
mod expiry_millis {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(expires_at: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(expires_at.unwrap_or(0))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok((raw != 0).then_some(raw))
    }
}
