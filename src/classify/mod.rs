//! Classification Engine
//!
//! Maps an `AnswerSet` to an `Analysis`. Pure and total: the same answers
//! always produce byte-identical orientation, meaning and tendencies, which is
//! what lets a verifier re-derive a result from embedded answers alone.
//!
//! Tendencies never repeat. When fewer than two threshold sentences fire the
//! padded list ends below four entries. Producers that pad by cycling the
//! fallbacks with repeats emit a different list for those profiles, and their
//! files verify as a tendencies mismatch.

pub mod catalog;
pub mod scoring;

pub use scoring::{Candidate, CandidateScore};

use serde::Serialize;

use crate::questionnaire::{AnswerSet, Signal};

/// Upper bound on reported tendencies
pub const MAX_TENDENCIES: usize = 6;
/// Padding target for tendencies
pub const MIN_TENDENCIES: usize = 4;
/// Gap at which a tension pair stops being "balanced"
const TENSION_GAP: f64 = 3.0;

pub(crate) fn is_high(x: f64) -> bool {
    x >= 8.0
}

pub(crate) fn is_med_high(x: f64) -> bool {
    x >= 7.0
}

pub(crate) fn is_center(x: f64) -> bool {
    (4.0..=6.0).contains(&x)
}

/// Derived numeric signals. Advisory only; never part of verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub government_role: f64,
    pub liberty: f64,
    pub markets: f64,
    pub safety_net: f64,
    pub communitarian: f64,
    pub merit: f64,
    pub free_speech: f64,
    pub expertise: f64,
    pub institutional: f64,
    pub participatory: f64,
    pub center_count: usize,
}

impl Signals {
    pub fn derive(answers: &AnswerSet) -> Self {
        let read = |signal: Signal| answers.get(signal) as f64;
        Self {
            government_role: read(Signal::GovernmentRole),
            liberty: read(Signal::Liberty),
            markets: read(Signal::Markets),
            safety_net: read(Signal::SafetyNet),
            communitarian: read(Signal::Identity),
            merit: read(Signal::Merit),
            free_speech: read(Signal::FreeSpeech),
            expertise: read(Signal::Expertise),
            institutional: (read(Signal::Institutions) + read(Signal::Expertise)) / 2.0,
            participatory: read(Signal::CitizenVoice),
            center_count: answers.iter().filter(|&a| is_center(a as f64)).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub orientation: String,
    pub meaning: String,
    pub tendencies: Vec<String>,
    pub tensions: Vec<String>,
    pub signals: Signals,
    pub scores: Vec<CandidateScore>,
}

/// Classify a completed questionnaire
pub fn classify(answers: &AnswerSet) -> Analysis {
    let signals = Signals::derive(answers);
    let board = scoring::score(&signals);
    let winner = scoring::select(&board);

    let (orientation, meaning) = if winner == Candidate::Hybrid && is_high(signals.communitarian) {
        (catalog::HYBRID_COHESION, catalog::HYBRID_COHESION_MEANING)
    } else {
        (winner.label(), winner.meaning())
    };

    Analysis {
        orientation: orientation.to_string(),
        meaning: meaning.to_string(),
        tendencies: tendencies(&signals, answers.mean()),
        tensions: tensions(&signals),
        signals,
        scores: board.to_vec(),
    }
}

fn tendencies(s: &Signals, mean: f64) -> Vec<String> {
    let checks: [(bool, &'static str); 11] = [
        (is_high(s.participatory), catalog::HIGH_PARTICIPATORY),
        (is_high(s.institutional), catalog::HIGH_INSTITUTIONAL),
        (is_high(s.communitarian), catalog::HIGH_COMMUNITARIAN),
        (is_high(s.safety_net), catalog::HIGH_SAFETY_NET),
        (is_med_high(s.markets), catalog::LEAN_MARKETS),
        (is_med_high(s.liberty), catalog::LEAN_LIBERTY),
        (is_med_high(s.free_speech), catalog::LEAN_SPEECH),
        (is_med_high(s.merit), catalog::LEAN_MERIT),
        (s.center_count >= 6, catalog::CENTER_MANY),
        (is_center(s.expertise), catalog::CENTER_EXPERTISE),
        (is_center(s.liberty), catalog::CENTER_LIBERTY),
    ];

    let mut out: Vec<&'static str> = checks
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|&(_, text)| text)
        .collect();

    // Only the sentence matching the mean gate is eligible, and neither
    // fallback repeats.
    let gated = if mean >= 6.0 {
        catalog::FALLBACK_PRAGMATIC
    } else {
        catalog::FALLBACK_TRADEOFFS
    };
    let fallbacks = [gated, catalog::FALLBACK_CIVIC_HEALTH];
    for text in fallbacks {
        if out.len() >= MIN_TENDENCIES {
            break;
        }
        if !out.contains(&text) {
            out.push(text);
        }
    }

    out.truncate(MAX_TENDENCIES);
    out.into_iter().map(String::from).collect()
}

fn tension(a: f64, b: f64, a_leads: &'static str, b_leads: &'static str, balanced: &'static str) -> String {
    let text = if (a - b).abs() >= TENSION_GAP {
        if a > b { a_leads } else { b_leads }
    } else {
        balanced
    };
    text.to_string()
}

fn tensions(s: &Signals) -> Vec<String> {
    vec![
        tension(
            s.institutional,
            s.participatory,
            catalog::TENSION_INSTITUTIONAL_OVER_VOICE,
            catalog::TENSION_VOICE_OVER_INSTITUTIONAL,
            catalog::TENSION_GOVERNANCE_BALANCED,
        ),
        tension(
            s.markets,
            s.safety_net,
            catalog::TENSION_MARKETS_OVER_SAFETY,
            catalog::TENSION_SAFETY_OVER_MARKETS,
            catalog::TENSION_ECONOMY_BALANCED,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(values: [i64; 10]) -> Analysis {
        classify(&AnswerSet::from_values(&values))
    }

    #[test]
    fn test_participation_advocate_wins_tie_with_cohesion() {
        let analysis = run([9, 3, 4, 9, 9, 6, 8, 6, 9, 9]);

        assert_eq!(analysis.signals.institutional, 7.5);
        assert_eq!(analysis.signals.center_count, 3);
        let points: Vec<u8> = analysis.scores.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![3, 1, 5, 5, 0]);

        assert_eq!(analysis.orientation, catalog::ADVOCATE);
        assert_eq!(analysis.meaning, catalog::ADVOCATE_MEANING);
        assert_eq!(
            analysis.tendencies,
            vec![
                catalog::HIGH_PARTICIPATORY,
                catalog::HIGH_COMMUNITARIAN,
                catalog::HIGH_SAFETY_NET,
                catalog::LEAN_SPEECH,
            ]
        );
        assert_eq!(
            analysis.tensions,
            vec![catalog::TENSION_GOVERNANCE_BALANCED, catalog::TENSION_SAFETY_OVER_MARKETS]
        );
    }

    #[test]
    fn test_hybrid_cohesion_refinement() {
        // institutional 9, participatory 9, communitarian 9
        let analysis = run([5, 5, 5, 5, 9, 5, 5, 9, 9, 9]);
        assert_eq!(analysis.orientation, catalog::HYBRID_COHESION);
        assert_eq!(analysis.meaning, catalog::HYBRID_COHESION_MEANING);
    }

    #[test]
    fn test_plain_hybrid_when_communitarian_is_moderate() {
        let analysis = run([5, 5, 5, 5, 7, 5, 5, 9, 9, 9]);
        assert_eq!(analysis.orientation, catalog::HYBRID);
        assert_eq!(analysis.meaning, catalog::HYBRID_MEANING);
    }

    #[test]
    fn test_balance_profile_for_center_answers() {
        let analysis = run([5; 10]);
        assert_eq!(analysis.orientation, catalog::BALANCE);
        assert_eq!(
            analysis.tendencies,
            vec![catalog::CENTER_MANY, catalog::CENTER_EXPERTISE, catalog::CENTER_LIBERTY, catalog::FALLBACK_TRADEOFFS]
        );
    }

    #[test]
    fn test_tendencies_truncated_to_six() {
        let analysis = run([10; 10]);
        assert_eq!(analysis.tendencies.len(), MAX_TENDENCIES);
        assert_eq!(analysis.tendencies[0], catalog::HIGH_PARTICIPATORY);
        assert_eq!(analysis.tendencies[5], catalog::LEAN_LIBERTY);
    }

    #[test]
    fn test_padding_never_duplicates() {
        // Nothing fires for all-ones
        let analysis = run([1; 10]);
        assert_eq!(
            analysis.tendencies,
            vec![catalog::FALLBACK_TRADEOFFS, catalog::FALLBACK_CIVIC_HEALTH]
        );
        assert_eq!(analysis.orientation, catalog::STEWARD);
    }

    #[test]
    fn test_padding_uses_mean_gate() {
        // Only free speech leans; mean >= 6 never gets the tradeoffs sentence.
        let analysis = run([7, 3, 6, 7, 7, 6, 7, 7, 7, 7]);
        assert_eq!(
            analysis.tendencies,
            vec![catalog::LEAN_SPEECH, catalog::FALLBACK_PRAGMATIC, catalog::FALLBACK_CIVIC_HEALTH]
        );
        assert!(!analysis.tendencies.iter().any(|t| t == catalog::FALLBACK_TRADEOFFS));
    }

    #[test]
    fn test_padding_reaches_four_from_two() {
        let analysis = run([1, 1, 1, 1, 9, 1, 8, 1, 1, 1]);
        assert_eq!(
            analysis.tendencies,
            vec![
                catalog::HIGH_COMMUNITARIAN,
                catalog::LEAN_SPEECH,
                catalog::FALLBACK_TRADEOFFS,
                catalog::FALLBACK_CIVIC_HEALTH,
            ]
        );
        assert_eq!(analysis.tendencies.len(), MIN_TENDENCIES);
    }

    #[test]
    fn test_tensions_directional() {
        let analysis = run([5, 5, 9, 2, 5, 5, 5, 9, 9, 2]);
        assert_eq!(
            analysis.tensions,
            vec![catalog::TENSION_INSTITUTIONAL_OVER_VOICE, catalog::TENSION_MARKETS_OVER_SAFETY]
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let answers = AnswerSet::from_values(&[3, 8, 2, 7, 6, 9, 1, 4, 10, 5]);
        let a = classify(&answers);
        let b = classify(&answers);
        assert_eq!(a.orientation, b.orientation);
        assert_eq!(a.meaning, b.meaning);
        assert_eq!(a.tendencies, b.tendencies);
    }
}
