use sha2::{Digest, Sha256};

/// Hex characters in a SHA-256 digest
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 of the UTF-8 bytes of `text`
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

pub fn is_checksum_hex(candidate: &str) -> bool {
    candidate.len() == CHECKSUM_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
