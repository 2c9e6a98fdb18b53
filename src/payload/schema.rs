//! Structural validation of an embedded (untrusted) payload document.
//!
//! The raw JSON map is kept alongside the typed view so the checksum can be
//! re-derived over exactly what was embedded.

use serde_json::{Map, Value};
use thiserror::Error;

use super::{is_checksum_hex, sha256_hex, CHECKSUM_FIELD, SCHEMA, VERSION};
use crate::questionnaire::{coerce_numeric, AnswerSet, QUESTIONNAIRE_ID, QUESTION_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("payload could not be decoded ({0})")]
    Undecodable(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("missing or invalid schema: {0}")]
    Schema(String),
    #[error("unsupported version: {0}")]
    Version(String),
    #[error("unexpected questionnaire: {0}")]
    Questionnaire(String),
    #[error("answers must be an array of {n} numeric values ({0})", n = QUESTION_COUNT)]
    Answers(String),
    #[error("missing analysis field: {0}")]
    MissingAnalysis(&'static str),
    #[error("analysis.tendencies must be an array of strings")]
    Tendencies,
    #[error("checksum_sha256 must be {n} lowercase hex characters, got {0:?}", n = super::CHECKSUM_HEX_LEN)]
    MalformedChecksum(String),
}

/// An embedded payload that passed structural checks. Nothing here is
/// trusted yet; `answers` is the only input to recomputation.
#[derive(Debug, Clone)]
pub struct ClaimedPayload {
    document: Map<String, Value>,
    pub version: String,
    pub questionnaire: String,
    pub timestamp: Option<String>,
    pub answers: AnswerSet,
    pub orientation: String,
    pub meaning: String,
    pub tendencies: Vec<String>,
    pub checksum: Option<String>,
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "absent".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn expect_literal(
    doc: &Map<String, Value>,
    field: &str,
    expected: &str,
    err: fn(String) -> SchemaError,
) -> Result<String, SchemaError> {
    match doc.get(field) {
        Some(Value::String(s)) if s == expected => Ok(s.clone()),
        other => Err(err(describe(other))),
    }
}

fn non_empty_text(analysis: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    match analysis.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(SchemaError::MissingAnalysis(field)),
    }
}

impl ClaimedPayload {
    pub fn from_document(document: Value) -> Result<Self, SchemaError> {
        let Value::Object(doc) = document else {
            return Err(SchemaError::NotAnObject);
        };

        expect_literal(&doc, "schema", SCHEMA, SchemaError::Schema)?;
        let version = expect_literal(&doc, "version", VERSION, SchemaError::Version)?;
        let questionnaire =
            expect_literal(&doc, "questionnaire", QUESTIONNAIRE_ID, SchemaError::Questionnaire)?;

        let answers = match doc.get("answers") {
            Some(Value::Array(items)) if items.len() == QUESTION_COUNT => {
                let numeric: Option<Vec<f64>> = items.iter().map(coerce_numeric).collect();
                let numeric = numeric.ok_or_else(|| {
                    SchemaError::Answers(format!("non-numeric entry in {}", Value::Array(items.clone())))
                })?;
                AnswerSet::from_f64s(&numeric)
            }
            Some(Value::Array(items)) => {
                return Err(SchemaError::Answers(format!("got {} entries", items.len())))
            }
            other => return Err(SchemaError::Answers(describe(other))),
        };

        let Some(Value::Object(analysis)) = doc.get("analysis") else {
            return Err(SchemaError::MissingAnalysis("analysis"));
        };
        let orientation = non_empty_text(analysis, "orientation")?;
        let meaning = non_empty_text(analysis, "meaning")?;
        let tendencies = match analysis.get("tendencies") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<String>>>()
                .ok_or(SchemaError::Tendencies)?,
            _ => return Err(SchemaError::Tendencies),
        };

        let checksum = match doc.get(CHECKSUM_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if is_checksum_hex(s) => Some(s.clone()),
            Some(other) => return Err(SchemaError::MalformedChecksum(describe(Some(other)))),
        };

        let timestamp = doc.get("timestamp").and_then(Value::as_str).map(String::from);

        Ok(Self {
            document: doc,
            version,
            questionnaire,
            timestamp,
            answers,
            orientation,
            meaning,
            tendencies,
            checksum,
        })
    }

    /// Compact JSON of the embedded document minus the checksum field, keys
    /// in embedded order
    pub fn canonical_json(&self) -> String {
        let unsealed: Map<String, Value> = self
            .document
            .iter()
            .filter(|(key, _)| key.as_str() != CHECKSUM_FIELD)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        serde_json::to_string(&unsealed).unwrap_or_default()
    }

    pub fn recompute_checksum(&self) -> String {
        sha256_hex(&self.canonical_json())
    }
}
