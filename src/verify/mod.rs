//! Verification Protocol
//!
//! Extract → decode → validate → recompute → compare. The embedded analysis
//! text is never trusted: the classifier is re-run on the embedded answers and
//! its output is the reference. A valid verdict proves internal consistency
//! only; it says nothing about who produced the file.

mod batch;
mod report;

pub use batch::{verify_paths, FileVerdict};

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{classify, MAX_TENDENCIES};
use crate::container::{self, FormatError};
use crate::payload::{decode_envelope, ClaimedPayload, SchemaError, EMBED_KEY};
use crate::questionnaire::AnswerSet;

/// A consistency check that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Mismatch {
    Orientation,
    Meaning,
    Tendencies,
    Checksum { expected: String, found: String },
}

impl Mismatch {
    pub fn label(&self) -> &'static str {
        match self {
            Mismatch::Orientation => "Orientation mismatch",
            Mismatch::Meaning => "Meaning mismatch",
            Mismatch::Tendencies => "Tendencies mismatch",
            Mismatch::Checksum { .. } => "Checksum mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChecksumStatus {
    Matched(String),
    Absent,
}

/// Why a file was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Format(FormatError),
    Schema(SchemaError),
    Consistency(Vec<Mismatch>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedResult {
    pub orientation: String,
    pub questionnaire: String,
    pub version: String,
    pub timestamp: Option<String>,
    pub answers: AnswerSet,
    pub checksum: ChecksumStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Ok(VerifiedResult),
    Invalid(Rejection),
    NoPayload,
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, Verdict::Ok(_))
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Verdict::Invalid(Rejection::Consistency(found)) => found,
            _ => &[],
        }
    }
}

/// Verify an arbitrary byte buffer. Never panics on malformed input.
pub fn verify(bytes: &[u8]) -> Verdict {
    let entries = match container::extract_metadata(bytes) {
        Ok(entries) => entries,
        Err(e) => return Verdict::Invalid(Rejection::Format(e)),
    };

    let mut matching = entries.into_iter().filter(|entry| entry.key == EMBED_KEY);
    let Some(entry) = matching.next() else {
        return Verdict::NoPayload;
    };
    let extra = matching.count();
    if extra > 0 {
        warn!("{} additional {} records ignored; verifying the first", extra, EMBED_KEY);
    }

    let claim = match decode_envelope(&entry.value).and_then(ClaimedPayload::from_document) {
        Ok(claim) => claim,
        Err(e) => return Verdict::Invalid(Rejection::Schema(e)),
    };

    verify_claim(&claim)
}

/// Recompute and compare an already validated claim
pub fn verify_claim(claim: &ClaimedPayload) -> Verdict {
    let recomputed = classify(&claim.answers);
    let mut mismatches = Vec::new();

    if claim.orientation != recomputed.orientation {
        mismatches.push(Mismatch::Orientation);
    }
    if claim.meaning != recomputed.meaning {
        mismatches.push(Mismatch::Meaning);
    }
    let expected = &recomputed.tendencies[..recomputed.tendencies.len().min(MAX_TENDENCIES)];
    if claim.tendencies.as_slice() != expected {
        mismatches.push(Mismatch::Tendencies);
    }

    let recomputed_checksum = claim.checksum.as_ref().map(|_| claim.recompute_checksum());
    if let (Some(found), Some(expected)) = (&claim.checksum, &recomputed_checksum) {
        if expected != found {
            mismatches.push(Mismatch::Checksum {
                expected: expected.clone(),
                found: found.clone(),
            });
        }
    }

    debug!(
        "Recomputed '{}' for {:?}: {} mismatch(es)",
        recomputed.orientation,
        claim.answers.as_slice(),
        mismatches.len()
    );

    if !mismatches.is_empty() {
        return Verdict::Invalid(Rejection::Consistency(mismatches));
    }

    let checksum = match recomputed_checksum {
        Some(hex) => ChecksumStatus::Matched(hex),
        None => ChecksumStatus::Absent,
    };

    Verdict::Ok(VerifiedResult {
        orientation: claim.orientation.clone(),
        questionnaire: claim.questionnaire.clone(),
        version: claim.version.clone(),
        timestamp: claim.timestamp.clone(),
        answers: claim.answers,
        checksum,
    })
}
