//! Compact binary snapshot format.

use std::io::{Read, Write};

use crate::error::{CacheError, Result};
use crate::serializer::{Serializer, Snapshot};

// == Binary Serializer ==
/// Compact snapshots via bincode.
///
/// The layout is bincode's and is not meant to be read outside Rust.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySerializer;

fn encode_error(err: bincode::Error) -> CacheError {
    match *err {
        bincode::ErrorKind::Io(io) => CacheError::Io(io),
        other => CacheError::Encode(other.to_string()),
    }
}

fn decode_error(err: bincode::Error) -> CacheError {
    match *err {
        bincode::ErrorKind::Io(io) if io.kind() != std::io::ErrorKind::UnexpectedEof => {
            CacheError::Io(io)
        }
        other => CacheError::Decode(other.to_string()),
    }
}

impl Serializer for BinarySerializer {
    fn encode(&self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        bincode::serialize(snapshot).map_err(encode_error)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Snapshot> {
        bincode::deserialize(bytes).map_err(decode_error)
    }

    fn encode_to(&self, writer: &mut dyn Write, snapshot: &Snapshot) -> Result<()> {
        bincode::serialize_into(writer, snapshot).map_err(encode_error)
    }

    fn decode_from(&self, reader: &mut dyn Read) -> Result<Snapshot> {
        bincode::deserialize_from(reader).map_err(decode_error)
    }
}
