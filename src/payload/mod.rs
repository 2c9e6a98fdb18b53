//! Canonical Payload
//!
//! The versioned record embedded in vault images. Only the verifiable subset
//! of an `Analysis` (orientation, meaning, tendencies) is carried; tensions,
//! signals and scores stay out so cosmetic additions to the analysis never
//! invalidate older files.
//!
//! IMPORTANT: any change to the fields or their order requires a new
//! `VERSION`.

pub mod checksum;
pub mod envelope;
pub mod schema;

pub use checksum::{is_checksum_hex, sha256_hex, CHECKSUM_HEX_LEN};
pub use envelope::{decode_envelope, encode_envelope};
pub use schema::{ClaimedPayload, SchemaError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Analysis;
use crate::questionnaire::{AnswerSet, QUESTIONNAIRE_ID};

pub const SCHEMA: &str = "IB_V1_RESULT";
pub const VERSION: &str = "1.0";
/// `tEXt` keyword the envelope is stored under
pub const EMBED_KEY: &str = "IB_V1";
pub const CHECKSUM_FIELD: &str = "checksum_sha256";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisClaim {
    pub orientation: String,
    pub meaning: String,
    pub tendencies: Vec<String>,
}

/// Field order is the canonical key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub schema: String,
    pub version: String,
    pub questionnaire: String,
    /// Advisory; covered by the checksum but not by the consistency check
    pub timestamp: String,
    pub answers: AnswerSet,
    pub analysis: AnalysisClaim,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_sha256: Option<String>,
}

/// Build a payload stamped with the current time
pub fn build_payload(answers: &[i64], analysis: &Analysis) -> Payload {
    build_payload_at(answers, analysis, Utc::now())
}

pub fn build_payload_at(answers: &[i64], analysis: &Analysis, at: DateTime<Utc>) -> Payload {
    Payload {
        schema: SCHEMA.to_string(),
        version: VERSION.to_string(),
        questionnaire: QUESTIONNAIRE_ID.to_string(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        answers: AnswerSet::from_values(answers),
        analysis: AnalysisClaim {
            orientation: analysis.orientation.clone(),
            meaning: analysis.meaning.clone(),
            tendencies: analysis.tendencies.clone(),
        },
        checksum_sha256: None,
    }
}

impl Payload {
    /// Compact JSON without the checksum field; the bytes the checksum covers
    pub fn canonical_json(&self) -> String {
        let unsealed = Payload {
            checksum_sha256: None,
            ..self.clone()
        };
        serde_json::to_string(&unsealed).unwrap_or_default()
    }

    /// Compact JSON including the checksum, if any
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn compute_checksum(&self) -> String {
        sha256_hex(&self.canonical_json())
    }

    /// Attach `checksum_sha256`, replacing any previous value
    pub fn seal(mut self) -> Self {
        self.checksum_sha256 = Some(self.compute_checksum());
        self
    }

    pub fn is_sealed(&self) -> bool {
        self.checksum_sha256.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use chrono::TimeZone;

    fn fixed_payload() -> Payload {
        let answers = AnswerSet::from_values(&[9, 3, 4, 9, 9, 6, 8, 6, 9, 9]);
        let analysis = classify(&answers);
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        build_payload_at(&answers.to_i64s(), &analysis, at)
    }

    #[test]
    fn test_canonical_key_order_and_format() {
        let payload = fixed_payload();
        let json = payload.canonical_json();
        assert!(json.starts_with(
            "{\"schema\":\"IB_V1_RESULT\",\"version\":\"1.0\",\"questionnaire\":\"Civic Foundations\",\"timestamp\":\"2025-01-02T03:04:05.000Z\",\"answers\":[9,3,4,9,9,6,8,6,9,9],\"analysis\":{\"orientation\":\"Civic Participation Advocate\",\"meaning\":"
        ));
        assert!(json.ends_with("]}}"));
        assert!(!json.contains(CHECKSUM_FIELD));
    }

    #[test]
    fn test_builder_reclamps_answers() {
        let answers = AnswerSet::from_values(&[5; 10]);
        let analysis = classify(&answers);
        let payload = build_payload(&[0, 11, -5, 7, 5, 5, 5, 5, 5, 5, 5, 5], &analysis);
        assert_eq!(payload.answers.as_slice(), &[1, 10, 1, 7, 5, 5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_builder_omits_tensions_and_signals() {
        let json = fixed_payload().to_json();
        assert!(!json.contains("tensions"));
        assert!(!json.contains("signals"));
        assert!(!json.contains("scores"));
    }

    #[test]
    fn test_seal_is_stable() {
        let payload = fixed_payload();
        let sealed = payload.clone().seal();
        let checksum = sealed.checksum_sha256.clone().unwrap();

        assert!(is_checksum_hex(&checksum));
        assert_eq!(checksum, sha256_hex(&payload.canonical_json()));
        // Sealing ignores an existing checksum
        assert_eq!(sealed.canonical_json(), payload.canonical_json());
        assert_eq!(sealed.clone().seal(), sealed);
        assert!(sealed.to_json().ends_with(&format!(",\"checksum_sha256\":\"{}\"}}", checksum)));
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let payload = fixed_payload();
        let mut altered = payload.clone();
        altered.analysis.meaning.push('!');
        assert_ne!(payload.compute_checksum(), altered.compute_checksum());
    }
}
