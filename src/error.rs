//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Config Error Enum ==
/// Raised while building or reconfiguring a cache.
///
/// These are caller bugs rather than runtime conditions, so they are kept
/// apart from [`CacheError`] and surface before any cache is handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The chosen serializer name is not registered
    #[error("not registered serializer name: {0}")]
    UnknownSerializer(String),

    /// Capacity must be at least one entry
    #[error("cache capacity cannot be zero")]
    ZeroCapacity,
}

// == Cache Error Enum ==
/// Errors returned by snapshot persistence.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The configured serializer was removed from the registry
    #[error("not registered serializer: {0}")]
    SerializerNotFound(String),

    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded
    #[error("encode error: {0}")]
    Encode(String),

    /// Snapshot content is malformed
    #[error("decode error: {0}")]
    Decode(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache persistence.
pub type Result<T> = std::result::Result<T, CacheError>;
