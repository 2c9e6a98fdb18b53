//! Text-safe carrier for payload JSON inside a `tEXt` chunk: standard,
//! padded base64 of the compact JSON.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use super::{Payload, SchemaError};

pub fn encode_envelope(payload: &Payload) -> String {
    STANDARD.encode(payload.to_json())
}

/// Reverse of `encode_envelope`, without assuming the document is well formed
pub fn decode_envelope(text: &str) -> Result<Value, SchemaError> {
    let raw = STANDARD
        .decode(text.trim())
        .map_err(|e| SchemaError::Undecodable(format!("base64: {}", e)))?;
    let json = String::from_utf8(raw)
        .map_err(|e| SchemaError::Undecodable(format!("utf-8: {}", e)))?;
    serde_json::from_str(&json).map_err(|e| SchemaError::Undecodable(format!("json: {}", e)))
}
