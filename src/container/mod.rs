//! PNG Metadata Container
//!
//! Minimal `tEXt` chunk writer/reader. Only the signature, the chunk framing
//! and `tEXt`/`IEND` tags are interpreted; every other chunk is carried through
//! byte-for-byte, which keeps the image renderable after an insert.
//!
//! Metadata written here survives plain file copies. Image hosts and social
//! platforms commonly strip ancillary chunks.

mod chunk;
mod crc;

pub use chunk::{encode_chunk, ChunkHeader, Chunks, MAX_CHUNK_DATA, SIGNATURE, TERMINAL, TEXT};
pub use crc::crc32;

use serde::Serialize;
use thiserror::Error;

/// PNG keywords are 1-79 bytes
pub const MAX_KEY_LEN: usize = 79;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("not a recognized container")]
    NotAContainer,
    #[error("no terminal chunk found")]
    MissingTerminal,
    #[error("invalid metadata key {0:?}: must be 1-79 bytes without NUL")]
    InvalidKey(String),
    #[error("metadata chunk of {0} bytes exceeds the chunk size limit")]
    ValueTooLarge(usize),
}

/// One `tEXt` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntry {
    pub key: String,
    pub value: String,
}

pub fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(&SIGNATURE)
}

/// Chunk walk over a container, after checking its signature
pub fn chunks(bytes: &[u8]) -> Result<Chunks<'_>, FormatError> {
    if !is_container(bytes) {
        return Err(FormatError::NotAContainer);
    }
    Ok(Chunks::after_signature(bytes))
}

/// Return a copy of `bytes` with a `tEXt` chunk (`key` NUL `value`) spliced in
/// immediately before `IEND`.
pub fn insert_metadata(bytes: &[u8], key: &str, value: &str) -> Result<Vec<u8>, FormatError> {
    let terminal = chunks(bytes)?
        .find(|header| header.is(&TERMINAL))
        .ok_or(FormatError::MissingTerminal)?;

    if key.is_empty() || key.len() > MAX_KEY_LEN || key.as_bytes().contains(&0) {
        return Err(FormatError::InvalidKey(key.to_string()));
    }

    let mut data = Vec::with_capacity(key.len() + 1 + value.len());
    data.extend_from_slice(key.as_bytes());
    data.push(0);
    data.extend_from_slice(value.as_bytes());
    let text_chunk = encode_chunk(&TEXT, &data)?;

    let (before, from_terminal) = bytes.split_at(terminal.offset);
    let mut out = Vec::with_capacity(bytes.len() + text_chunk.len());
    out.extend_from_slice(before);
    out.extend_from_slice(&text_chunk);
    out.extend_from_slice(from_terminal);
    Ok(out)
}

/// All `tEXt` records in file order. A truncated tail ends the walk quietly.
pub fn extract_metadata(bytes: &[u8]) -> Result<Vec<TextEntry>, FormatError> {
    let entries = chunks(bytes)?
        .filter(|header| header.is(&TEXT))
        .filter_map(|header| {
            let data = &bytes[header.data_range()];
            let sep = data.iter().position(|&b| b == 0)?;
            if sep == 0 {
                return None;
            }
            Some(TextEntry {
                key: String::from_utf8_lossy(&data[..sep]).into_owned(),
                value: String::from_utf8_lossy(&data[sep + 1..]).into_owned(),
            })
        })
        .collect();
    Ok(entries)
}

/// First record stored under `key`
pub fn find_metadata(bytes: &[u8], key: &str) -> Result<Option<TextEntry>, FormatError> {
    Ok(extract_metadata(bytes)?.into_iter().find(|entry| entry.key == key))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signature, a fake header chunk, a fake data chunk, IEND
    fn sample_container() -> Vec<u8> {
        let mut bytes = SIGNATURE.to_vec();
        bytes.extend(encode_chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]).unwrap());
        bytes.extend(encode_chunk(b"IDAT", &[1, 2, 3, 4]).unwrap());
        bytes.extend(encode_chunk(&TERMINAL, &[]).unwrap());
        bytes
    }

    #[test]
    fn test_is_container() {
        assert!(is_container(&sample_container()));
        assert!(!is_container(&[0, 0, 0, 0]));
        assert!(!is_container(&SIGNATURE[..7]));
    }

    #[test]
    fn test_insert_before_terminal() {
        let original = sample_container();
        let iend_offset = original.len() - 12;
        let out = insert_metadata(&original, "IB_V1", "payload").unwrap();

        let inserted_len = 12 + "IB_V1".len() + 1 + "payload".len();
        assert_eq!(out.len(), original.len() + inserted_len);
        // Everything before IEND is untouched, IEND moved intact to the end
        assert_eq!(&out[..iend_offset], &original[..iend_offset]);
        assert_eq!(&out[out.len() - 12..], &original[iend_offset..]);

        let kinds: Vec<[u8; 4]> = chunks(&out).unwrap().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![*b"IHDR", *b"IDAT", TEXT, TERMINAL]);
    }

    #[test]
    fn test_inserted_chunk_crc_is_valid() {
        let out = insert_metadata(&sample_container(), "k", "v").unwrap();
        let text = chunks(&out).unwrap().find(|h| h.is(&TEXT)).unwrap();
        let stored = u32::from_be_bytes(out[text.end() - 4..text.end()].try_into().unwrap());
        assert_eq!(stored, crc32(&out[text.offset + 4..text.end() - 4]));
    }

    #[test]
    fn test_round_trip_preserves_text() {
        let value = "eyJzY2hlbWEiOiJJQl9WMV9SRVNVTFQifQ==\u{2019} ünïcode";
        let out = insert_metadata(&sample_container(), "IB_V1", value).unwrap();
        let entries = extract_metadata(&out).unwrap();
        assert_eq!(entries, vec![TextEntry { key: "IB_V1".into(), value: value.into() }]);

        // Re-inserting keeps earlier entries in file order
        let twice = insert_metadata(&out, "Comment", "second").unwrap();
        let entries = extract_metadata(&twice).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, value);
        assert_eq!(entries[1].key, "Comment");
    }

    #[test]
    fn test_insert_rejects_non_container() {
        assert_eq!(insert_metadata(&[0, 0, 0, 0], "k", "v"), Err(FormatError::NotAContainer));
    }

    #[test]
    fn test_insert_requires_terminal() {
        let mut bytes = sample_container();
        bytes.truncate(bytes.len() - 12);
        assert_eq!(insert_metadata(&bytes, "k", "v"), Err(FormatError::MissingTerminal));
    }

    #[test]
    fn test_insert_rejects_bad_keys() {
        let c = sample_container();
        assert!(matches!(insert_metadata(&c, "", "v"), Err(FormatError::InvalidKey(_))));
        assert!(matches!(insert_metadata(&c, "a\0b", "v"), Err(FormatError::InvalidKey(_))));
        assert!(matches!(insert_metadata(&c, &"k".repeat(80), "v"), Err(FormatError::InvalidKey(_))));
    }

    #[test]
    fn test_extract_from_truncated_container() {
        let out = insert_metadata(&sample_container(), "IB_V1", "abc").unwrap();
        let text = chunks(&out).unwrap().find(|h| h.is(&TEXT)).unwrap();

        // Cut inside the text chunk: nothing recoverable, but no error either
        assert!(extract_metadata(&out[..text.end() - 2]).unwrap().is_empty());
        // Cut inside IEND: the text chunk is still complete
        assert_eq!(extract_metadata(&out[..out.len() - 3]).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_skips_keyless_chunks() {
        let mut bytes = SIGNATURE.to_vec();
        bytes.extend(encode_chunk(&TEXT, b"\0orphan").unwrap());
        bytes.extend(encode_chunk(&TEXT, b"no separator").unwrap());
        bytes.extend(encode_chunk(&TEXT, b"k\0v\0w").unwrap());
        bytes.extend(encode_chunk(&TERMINAL, &[]).unwrap());

        let entries = extract_metadata(&bytes).unwrap();
        assert_eq!(entries, vec![TextEntry { key: "k".into(), value: "v\0w".into() }]);
    }

    #[test]
    fn test_find_metadata() {
        let out = insert_metadata(&sample_container(), "Other", "x").unwrap();
        let out = insert_metadata(&out, "IB_V1", "first").unwrap();
        let out = insert_metadata(&out, "IB_V1", "second").unwrap();
        assert_eq!(find_metadata(&out, "IB_V1").unwrap().unwrap().value, "first");
        assert!(find_metadata(&out, "Missing").unwrap().is_none());
    }
}
