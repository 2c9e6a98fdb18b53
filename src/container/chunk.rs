//! Chunk layout and the lazy chunk walk.
//!
//! ```text
//! ┌────────────┬───────────┬──────────────┬────────────┐
//! │ length u32 │ type [4]  │ data[length] │ crc u32    │
//! │ big-endian │ ASCII tag │              │ type‖data  │
//! └────────────┴───────────┴──────────────┴────────────┘
//! ```

use std::borrow::Cow;
use std::ops::Range;

use super::{crc, FormatError};

pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];
pub const TERMINAL: [u8; 4] = *b"IEND";
pub const TEXT: [u8; 4] = *b"tEXt";

/// Length prefix + type tag
const HEADER_LEN: usize = 8;
const CRC_LEN: usize = 4;
/// Chunk lengths are limited to 2^31 - 1
pub const MAX_CHUNK_DATA: usize = 0x7FFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Offset of the length prefix
    pub offset: usize,
    pub length: u32,
    pub kind: [u8; 4],
}

impl ChunkHeader {
    pub fn data_range(&self) -> Range<usize> {
        let start = self.offset + HEADER_LEN;
        start..start + self.length as usize
    }

    /// One past the CRC
    pub fn end(&self) -> usize {
        self.data_range().end + CRC_LEN
    }

    pub fn is(&self, kind: &[u8; 4]) -> bool {
        &self.kind == kind
    }

    pub fn kind_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.kind)
    }
}

/// Walks chunk headers from just after the signature. Stops (without error)
/// at the first chunk whose declared extent runs past the buffer.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Chunks<'a> {
    /// Caller is responsible for checking the signature first.
    pub(crate) fn after_signature(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: SIGNATURE.len(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = ChunkHeader;

    fn next(&mut self) -> Option<ChunkHeader> {
        let header_end = self.offset.checked_add(HEADER_LEN)?;
        let head = self.bytes.get(self.offset..header_end)?;

        let length = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
        let kind = [head[4], head[5], head[6], head[7]];
        let end = header_end
            .checked_add(length as usize)
            .and_then(|n| n.checked_add(CRC_LEN))?;
        if end > self.bytes.len() {
            // Park at the end so the walk stays finished
            self.offset = self.bytes.len();
            return None;
        }

        let header = ChunkHeader {
            offset: self.offset,
            length,
            kind,
        };
        self.offset = end;
        Some(header)
    }
}

/// Serialize a complete chunk: length, type, data, CRC over type‖data
pub fn encode_chunk(kind: &[u8; 4], data: &[u8]) -> Result<Vec<u8>, FormatError> {
    if data.len() > MAX_CHUNK_DATA {
        return Err(FormatError::ValueTooLarge(data.len()));
    }

    let checksum = crc::update(crc::update(0xFFFF_FFFF, kind), data) ^ 0xFFFF_FFFF;

    let mut out = Vec::with_capacity(HEADER_LEN + data.len() + CRC_LEN);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum.to_be_bytes());
    Ok(out)
}
