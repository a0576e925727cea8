//! JSON snapshot format.

use std::io::{Read, Write};

use crate::error::{CacheError, Result};
use crate::serializer::{Serializer, Snapshot};

// == JSON Serializer ==
/// Human-readable snapshots via serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

fn encode_error(err: serde_json::Error) -> CacheError {
    if err.is_io() {
        CacheError::Io(err.into())
    } else {
        CacheError::Encode(err.to_string())
    }
}

fn decode_error(err: serde_json::Error) -> CacheError {
    // Truncated input reports as Eof, not Io, so it lands in Decode.
    if err.is_io() {
        CacheError::Io(err.into())
    } else {
        CacheError::Decode(err.to_string())
    }
}

impl Serializer for JsonSerializer {
    fn encode(&self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        serde_json::to_vec(snapshot).map_err(encode_error)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Snapshot> {
        serde_json::from_slice(bytes).map_err(decode_error)
    }

    fn encode_to(&self, writer: &mut dyn Write, snapshot: &Snapshot) -> Result<()> {
        serde_json::to_writer(&mut *writer, snapshot).map_err(encode_error)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn decode_from(&self, reader: &mut dyn Read) -> Result<Snapshot> {
        serde_json::from_reader(reader).map_err(decode_error)
    }
}
