//! Answer coercion
//!
//! Everything that reaches the classifier goes through `AnswerSet`, which
//! always holds exactly ten values in `MIN_ANSWER..=MAX_ANSWER`. Bad input is
//! coerced, never rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Signal, QUESTION_COUNT};

pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 10;

/// Ten clamped answers, indexed by question position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", from = "Vec<Value>")]
pub struct AnswerSet([u8; QUESTION_COUNT]);

/// Strict numeric view of a JSON value: numbers and numeric strings only.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn clamp_answer(raw: f64) -> u8 {
    if !raw.is_finite() {
        return MIN_ANSWER;
    }
    raw.round().clamp(MIN_ANSWER as f64, MAX_ANSWER as f64) as u8
}

impl AnswerSet {
    fn collect(raw: impl Iterator<Item = f64>) -> Self {
        let mut out = [MIN_ANSWER; QUESTION_COUNT];
        for (slot, value) in out.iter_mut().zip(raw) {
            *slot = clamp_answer(value);
        }
        Self(out)
    }

    /// Clamp integer answers, truncating or padding to ten entries
    pub fn from_values(values: &[i64]) -> Self {
        Self::collect(values.iter().map(|&v| v as f64))
    }

    pub fn from_f64s(values: &[f64]) -> Self {
        Self::collect(values.iter().copied())
    }

    /// Parse free-form tokens (CLI arguments, form fields). Unparseable
    /// tokens become `MIN_ANSWER`.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self::collect(
            tokens
                .iter()
                .map(|t| t.as_ref().trim().parse::<f64>().unwrap_or(f64::NAN)),
        )
    }

    pub fn from_json(values: &[Value]) -> Self {
        Self::collect(values.iter().map(|v| coerce_numeric(v).unwrap_or(f64::NAN)))
    }

    pub fn get(&self, signal: Signal) -> u8 {
        self.0[signal.position()]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn to_i64s(&self) -> Vec<i64> {
        self.iter().map(i64::from).collect()
    }

    pub fn mean(&self) -> f64 {
        let sum: u32 = self.0.iter().map(|&a| a as u32).sum();
        sum as f64 / QUESTION_COUNT as f64
    }
}

impl From<Vec<Value>> for AnswerSet {
    fn from(values: Vec<Value>) -> Self {
        Self::from_json(&values)
    }
}

impl From<AnswerSet> for Vec<u8> {
    fn from(answers: AnswerSet) -> Self {
        answers.0.to_vec()
    }
}
