//! Serializer Module
//!
//! Snapshot formats are pluggable: a [`Serializer`] turns the key -> entry
//! map into bytes and back, and a [`SerializerRegistry`] maps format names
//! to implementations.
//!
//! # Builtin formats
//! - `"default"`, `"json"` - [`JsonSerializer`], textual and interoperable
//! - `"binary"`, `"bincode"` - [`BinarySerializer`], compact, Rust-specific
//!
//! # JSON shape
//! A snapshot is one object keyed by cache key. Each entry is
//! `{"value": <tagged value>, "expiry": <unix ms, 0 = never>}`, where the
//! value is an object with a single variant-name key:
//!
//! ```text
//! {"session": {"value": {"Str": "abc"}, "expiry": 0},
//!  "hits":    {"value": {"Int": 3}, "expiry": 1700000060000},
//!  "ratio":   {"value": {"Float": "NaN"}, "expiry": 0},
//!  "empty":   {"value": "Null", "expiry": 0}}
//! ```
//!
//! Variants are `Null`, `Bool`, `Int`, `Float`, `Str`, `Bytes` (array of
//! byte numbers), `List` and `Map`. Non-finite floats are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"`.

mod binary;
mod json;
mod registry;

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::cache::CacheEntry;
use crate::error::Result;

pub use binary::BinarySerializer;
pub use json::JsonSerializer;
pub use registry::SerializerRegistry;

/// The logical snapshot schema: key -> value plus expiry.
pub type Snapshot = HashMap<String, CacheEntry>;

// == Serializer Trait ==
/// Encodes and decodes snapshots.
///
/// The stream variants let save/load work on files without building an
/// intermediate buffer.
pub trait Serializer: Send + Sync {
    fn encode(&self, snapshot: &Snapshot) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Snapshot>;

    fn encode_to(&self, writer: &mut dyn Write, snapshot: &Snapshot) -> Result<()>;

    fn decode_from(&self, reader: &mut dyn Read) -> Result<Snapshot>;
}
