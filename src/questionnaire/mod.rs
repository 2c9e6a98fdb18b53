//! Questionnaire Catalog
//!
//! The fixed "Civic Foundations" question set. Position in the answer array is
//! the question identity, so the table order here is part of the wire format.

mod answers;

pub use answers::{coerce_numeric, AnswerSet, MAX_ANSWER, MIN_ANSWER};

use serde::Serialize;

/// Identifier embedded in every payload
pub const QUESTIONNAIRE_ID: &str = "Civic Foundations";

/// Number of questions (and answers)
pub const QUESTION_COUNT: usize = 10;

/// The named signal each answer position feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    GovernmentRole,
    Liberty,
    Markets,
    SafetyNet,
    Identity,
    Merit,
    FreeSpeech,
    Institutions,
    Expertise,
    CitizenVoice,
}

impl Signal {
    /// Index of this signal inside an `AnswerSet`
    pub fn position(self) -> usize {
        match self {
            Signal::GovernmentRole => 0,
            Signal::Liberty => 1,
            Signal::Markets => 2,
            Signal::SafetyNet => 3,
            Signal::Identity => 4,
            Signal::Merit => 5,
            Signal::FreeSpeech => 6,
            Signal::Institutions => 7,
            Signal::Expertise => 8,
            Signal::CitizenVoice => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Signal::GovernmentRole => "government role",
            Signal::Liberty => "liberty",
            Signal::Markets => "markets",
            Signal::SafetyNet => "safety net",
            Signal::Identity => "civic identity",
            Signal::Merit => "merit",
            Signal::FreeSpeech => "free speech",
            Signal::Institutions => "institutions",
            Signal::Expertise => "expertise",
            Signal::CitizenVoice => "citizen voice",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: u8,
    pub signal: Signal,
    pub text: &'static str,
}

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        signal: Signal::GovernmentRole,
        text: "The federal government should play an active role in solving major national problems, even if that means expanding its authority.",
    },
    Question {
        id: 2,
        signal: Signal::Liberty,
        text: "Protecting individual liberty should take precedence over collective outcomes, even when collective solutions might be more efficient.",
    },
    Question {
        id: 3,
        signal: Signal::Markets,
        text: "Free markets generally produce better outcomes than government regulation, even in essential sectors.",
    },
    Question {
        id: 4,
        signal: Signal::SafetyNet,
        text: "A strong social safety net is necessary to ensure basic dignity and stability for all citizens.",
    },
    Question {
        id: 5,
        signal: Signal::Identity,
        text: "A shared national identity, culture, and civic values are essential for a healthy democracy.",
    },
    Question {
        id: 6,
        signal: Signal::Merit,
        text: "Outcomes in society should primarily reflect merit and effort, not enforced equality.",
    },
    Question {
        id: 7,
        signal: Signal::FreeSpeech,
        text: "Free speech should be protected even when it is offensive, unpopular, or destabilizing.",
    },
    Question {
        id: 8,
        signal: Signal::Institutions,
        text: "America\u{2019}s core institutions need reform, but not radical dismantling.",
    },
    Question {
        id: 9,
        signal: Signal::Expertise,
        text: "Experts and institutions should guide policy decisions more than public opinion.",
    },
    Question {
        id: 10,
        signal: Signal::CitizenVoice,
        text: "Citizens should have structured, ongoing ways to express their views beyond elections.",
    },
];
