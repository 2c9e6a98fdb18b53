//! Human-readable verification reports

use std::fmt;

use super::{ChecksumStatus, Mismatch, Rejection, Verdict, VerifiedResult};
use crate::utils::truncate_text;

const CHECKSUM_PREVIEW: usize = 12;

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Checksum { expected, found } => write!(
                f,
                "{} (embedded {}, recomputed {})",
                self.label(),
                truncate_text(found, CHECKSUM_PREVIEW),
                truncate_text(expected, CHECKSUM_PREVIEW)
            ),
            _ => f.write_str(self.label()),
        }
    }
}

impl fmt::Display for ChecksumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumStatus::Matched(hex) => {
                write!(f, "matched ({})", truncate_text(hex, CHECKSUM_PREVIEW))
            }
            ChecksumStatus::Absent => f.write_str("absent (legacy file)"),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Format(e) => write!(f, "format error: {}", e),
            Rejection::Schema(e) => write!(f, "schema error: {}", e),
            Rejection::Consistency(found) => {
                let labels: Vec<String> = found.iter().map(ToString::to_string).collect();
                write!(f, "{}", labels.join("; "))
            }
        }
    }
}

impl fmt::Display for VerifiedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verified: {}", self.orientation)?;
        writeln!(f, "  questionnaire: {} v{}", self.questionnaire, self.version)?;
        if let Some(ts) = &self.timestamp {
            writeln!(f, "  timestamp:     {}", ts)?;
        }
        writeln!(f, "  answers:       {:?}", self.answers.as_slice())?;
        write!(f, "  checksum:      {}", self.checksum)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ok(result) => fmt::Display::fmt(result, f),
            Verdict::Invalid(rejection) => write!(f, "Invalid: {}", rejection),
            Verdict::NoPayload => f.write_str("No vault payload found"),
        }
    }
}
