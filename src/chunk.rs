//! Exact-sized snapshots of physical reads.
//!
//! The stream reader recycles one fixed-size buffer across read cycles, so
//! nothing downstream may hold a reference into it. A [`Chunk`] is the
//! boundary: an owned copy of exactly the bytes one read produced, safe to
//! keep after the buffer has been overwritten.

use std::borrow::Cow;

use bytes::Bytes;

/// An immutable, owned snapshot of the bytes produced by one physical read.
///
/// A chunk owns its own copy of the data and never aliases the reusable read
/// buffer it was taken from. Chunks may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    data: Bytes,
}

impl Chunk {
    /// Create a chunk by copying the given bytes.
    ///
    /// The caller passes exactly the filled portion of its read buffer
    /// (`&buf[..n]`); the chunk takes an independent copy.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Number of bytes in this chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the chunk holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw bytes of this chunk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decode this chunk's bytes as UTF-8, replacing invalid sequences.
    ///
    /// Decoding is per-chunk: a multi-byte character physically split across
    /// two chunks is decoded independently on each side, producing
    /// replacement characters rather than the original character. Callers
    /// transmitting non-ASCII payloads should size writes so characters do
    /// not straddle reads, or tolerate replacement characters.
    pub fn decode_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl From<&[u8]> for Chunk {
    fn from(data: &[u8]) -> Self {
        Self::copy_from_slice(data)
    }
}
