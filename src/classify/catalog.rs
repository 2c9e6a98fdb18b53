//! Fixed text banks. Changing any string here changes the verifiable output
//! and requires a payload version bump.

pub const HYBRID: &str = "Civic Institutional Hybrid";
pub const HYBRID_MEANING: &str = "You value strong institutions and reform, while also strongly supporting structured citizen input beyond elections. You tend to prefer transparency and accountability over ideological alignment.";

pub const HYBRID_COHESION: &str = "Civic Institutional Hybrid (Cohesion Emphasis)";
pub const HYBRID_COHESION_MEANING: &str = "You balance institutional reform and citizen voice, with a strong emphasis on national cohesion and shared civic values.";

pub const STEWARD: &str = "Institutional Steward";
pub const STEWARD_MEANING: &str = "You prioritize stability and reform within existing institutions. You tend to prefer measured change and credible governance structures over disruptive approaches.";

pub const ADVOCATE: &str = "Civic Participation Advocate";
pub const ADVOCATE_MEANING: &str = "You strongly support ongoing citizen input. You may be skeptical of institutions when they feel unresponsive, and you favor mechanisms that increase transparency and feedback.";

pub const COHESION: &str = "Civic Cohesion Builder";
pub const COHESION_MEANING: &str = "You emphasize both shared civic identity and practical support systems that promote national stability. You tend to value unity, responsibility, and constructive reform.";

pub const BALANCE: &str = "Civic Balance Profile";
pub const BALANCE_MEANING: &str = "Your responses suggest a balanced approach to civic tradeoffs, with context-dependent views across institutions, liberty, and collective needs.";

// Tendencies, in check order
pub const HIGH_PARTICIPATORY: &str = "Strong preference for structured citizen input beyond elections.";
pub const HIGH_INSTITUTIONAL: &str = "High value on institutional stability and reform over disruption.";
pub const HIGH_COMMUNITARIAN: &str = "Strong emphasis on shared civic identity and national cohesion.";
pub const HIGH_SAFETY_NET: &str = "Strong support for a safety net to ensure dignity and stability.";

pub const LEAN_MARKETS: &str = "Tends to favor market mechanisms, with regulation as a guardrail rather than a default.";
pub const LEAN_LIBERTY: &str = "Tends to prioritize individual liberty when tradeoffs arise.";
pub const LEAN_SPEECH: &str = "Leans toward broad free speech protections even when content is unpopular.";
pub const LEAN_MERIT: &str = "Leans toward merit and effort as key drivers of outcomes.";

pub const CENTER_MANY: &str = "Frequently chooses middle values, suggesting conditional or context-dependent views.";
pub const CENTER_EXPERTISE: &str = "Balances expert guidance with public input rather than strongly favoring one.";
pub const CENTER_LIBERTY: &str = "Weighs individual liberty against collective outcomes case-by-case.";

// Padding fallbacks
pub const FALLBACK_PRAGMATIC: &str = "Generally supports pragmatic solutions over rigid ideology.";
pub const FALLBACK_TRADEOFFS: &str = "Tends to weigh tradeoffs carefully and avoid absolutist positions.";
pub const FALLBACK_CIVIC_HEALTH: &str = "Values civic health and accountability as long-term priorities.";

// Tensions
pub const TENSION_INSTITUTIONAL_OVER_VOICE: &str = "Leans toward institutional stability over direct citizen input.";
pub const TENSION_VOICE_OVER_INSTITUTIONAL: &str = "Leans toward direct citizen input over institutional gatekeeping.";
pub const TENSION_GOVERNANCE_BALANCED: &str = "Balances institutional stability with strong citizen input.";

pub const TENSION_MARKETS_OVER_SAFETY: &str = "Leans toward market solutions more than expanding safety-net protections.";
pub const TENSION_SAFETY_OVER_MARKETS: &str = "Leans toward safety-net protections more than market-first approaches.";
pub const TENSION_ECONOMY_BALANCED: &str = "Balances market mechanisms with safety-net protections.";
