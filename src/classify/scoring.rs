//! Orientation scoring
//!
//! Scores are a fold over `RULES`; each row awards points to one candidate
//! when its predicate holds. Selection keeps the first candidate with the
//! strictly highest total, so `Candidate::ALL` order is the tie-break.

use serde::Serialize;

use super::catalog;
use super::{is_center, is_high, is_med_high, Signals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidate {
    Hybrid,
    Steward,
    Advocate,
    Cohesion,
    Balance,
}

impl Candidate {
    /// Declaration order; earlier wins ties
    pub const ALL: [Candidate; 5] = [
        Candidate::Hybrid,
        Candidate::Steward,
        Candidate::Advocate,
        Candidate::Cohesion,
        Candidate::Balance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Candidate::Hybrid => catalog::HYBRID,
            Candidate::Steward => catalog::STEWARD,
            Candidate::Advocate => catalog::ADVOCATE,
            Candidate::Cohesion => catalog::COHESION,
            Candidate::Balance => catalog::BALANCE,
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Candidate::Hybrid => catalog::HYBRID_MEANING,
            Candidate::Steward => catalog::STEWARD_MEANING,
            Candidate::Advocate => catalog::ADVOCATE_MEANING,
            Candidate::Cohesion => catalog::COHESION_MEANING,
            Candidate::Balance => catalog::BALANCE_MEANING,
        }
    }

    fn index(self) -> usize {
        match self {
            Candidate::Hybrid => 0,
            Candidate::Steward => 1,
            Candidate::Advocate => 2,
            Candidate::Cohesion => 3,
            Candidate::Balance => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    GovernmentRole,
    SafetyNet,
    Expertise,
    Institutional,
    Participatory,
    Communitarian,
}

impl Metric {
    fn read(self, signals: &Signals) -> f64 {
        match self {
            Metric::GovernmentRole => signals.government_role,
            Metric::SafetyNet => signals.safety_net,
            Metric::Expertise => signals.expertise,
            Metric::Institutional => signals.institutional,
            Metric::Participatory => signals.participatory,
            Metric::Communitarian => signals.communitarian,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Predicate {
    High(Metric),
    NotHigh(Metric),
    MedHigh(Metric),
    Center(Metric),
    CenterCountAtLeast(usize),
}

impl Predicate {
    fn holds(self, signals: &Signals) -> bool {
        match self {
            Predicate::High(m) => is_high(m.read(signals)),
            Predicate::NotHigh(m) => !is_high(m.read(signals)),
            Predicate::MedHigh(m) => is_med_high(m.read(signals)),
            Predicate::Center(m) => is_center(m.read(signals)),
            Predicate::CenterCountAtLeast(n) => signals.center_count >= n,
        }
    }
}

use Metric::*;
use Predicate::*;

static RULES: &[(Candidate, Predicate, u8)] = &[
    (Candidate::Hybrid, High(Institutional), 2),
    (Candidate::Hybrid, High(Participatory), 2),
    (Candidate::Hybrid, MedHigh(Communitarian), 1),
    (Candidate::Steward, High(Institutional), 3),
    (Candidate::Steward, NotHigh(Participatory), 1),
    (Candidate::Steward, MedHigh(Expertise), 1),
    (Candidate::Advocate, High(Participatory), 3),
    (Candidate::Advocate, NotHigh(Institutional), 1),
    (Candidate::Advocate, MedHigh(GovernmentRole), 1),
    (Candidate::Cohesion, High(Communitarian), 2),
    (Candidate::Cohesion, High(SafetyNet), 2),
    (Candidate::Cohesion, MedHigh(Institutional), 1),
    (Candidate::Balance, CenterCountAtLeast(6), 3),
    (Candidate::Balance, Center(Institutional), 1),
    (Candidate::Balance, Center(Participatory), 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    pub candidate: Candidate,
    pub points: u8,
}

/// Score every candidate, in declaration order
pub fn score(signals: &Signals) -> [CandidateScore; 5] {
    let initial = Candidate::ALL.map(|candidate| CandidateScore { candidate, points: 0 });
    RULES
        .iter()
        .filter(|(_, predicate, _)| predicate.holds(signals))
        .fold(initial, |mut board, &(candidate, _, points)| {
            board[candidate.index()].points += points;
            board
        })
}

/// Stable max: the first candidate with the strictly highest score
pub fn select(board: &[CandidateScore]) -> Candidate {
    board
        .iter()
        .fold(None::<CandidateScore>, |best, entry| match best {
            Some(b) if b.points >= entry.points => Some(b),
            _ => Some(*entry),
        })
        .map(|winner| winner.candidate)
        .unwrap_or(Candidate::Balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(points: [u8; 5]) -> Vec<CandidateScore> {
        Candidate::ALL
            .iter()
            .zip(points)
            .map(|(&candidate, points)| CandidateScore { candidate, points })
            .collect()
    }

    #[test]
    fn test_select_first_declared_on_tie() {
        assert_eq!(select(&board([1, 3, 5, 5, 0])), Candidate::Advocate);
        assert_eq!(select(&board([4, 4, 4, 4, 4])), Candidate::Hybrid);
        assert_eq!(select(&board([0, 0, 0, 0, 1])), Candidate::Balance);
    }

    #[test]
    fn test_every_candidate_has_rules() {
        for candidate in Candidate::ALL {
            assert!(RULES.iter().any(|(c, _, _)| *c == candidate));
        }
    }
}
