use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TextError;
use crate::markers::MarkerSet;

pub const SEDA_BASELINE: i64 = 50;
pub const INFLATION_WEIGHT: i64 = 5;
pub const DISTRESS_WEIGHT: i64 = 3;
pub const GROUNDING_WEIGHT: i64 = 4;

/// Concrete daily-life anchors.
pub const GROUNDING_TERMS: &[&str] = &[
    "work", "job", "sleep", "slept", "ate", "eat", "eating", "dinner", "lunch", "breakfast",
    "walk", "gym", "exercise", "cook", "cooking", "groceries", "rent", "bills", "doctor",
    "family", "friend", "friends", "routine", "school", "class", "shower", "budget", "kids",
];

/// Grandiosity and dissociation.
pub const INFLATION_TERMS: &[&str] = &[
    "chosen",
    "destiny",
    "enlightened",
    "awakened",
    "ascended",
    "ascension",
    "the universe told me",
    "special mission",
    "divine mission",
    "i am god",
    "prophet",
    "cosmic",
    "transcend",
    "nothing is real",
    "simulation",
    "beyond human",
    "higher dimension",
    "vibrating higher",
];

/// Crisis and overwhelm.
pub const DISTRESS_TERMS: &[&str] = &[
    "hopeless",
    "can't go on",
    "want to die",
    "kill myself",
    "end it all",
    "suicide",
    "suicidal",
    "overwhelmed",
    "panic",
    "panicking",
    "can't breathe",
    "worthless",
    "no way out",
    "give up",
    "giving up",
    "self harm",
    "hurt myself",
    "falling apart",
    "breaking down",
    "can't cope",
    "alone",
    "empty",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SedaStatus {
    Safe,
    Caution,
    Danger,
}

impl SedaStatus {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            SedaStatus::Danger
        } else if score > 50 {
            SedaStatus::Caution
        } else {
            SedaStatus::Safe
        }
    }
}

impl std::fmt::Display for SedaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SedaStatus::Safe => "SAFE",
            SedaStatus::Caution => "CAUTION",
            SedaStatus::Danger => "DANGER",
        };
        f.write_str(s)
    }
}

/// How downstream generation must behave for this text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SedaMode {
    LogicMode,
    HoldingSpace,
    CrisisMode,
}

impl SedaMode {
    pub fn from_score(score: u8) -> Self {
        if score > 75 {
            SedaMode::CrisisMode
        } else if score > 50 {
            SedaMode::HoldingSpace
        } else {
            SedaMode::LogicMode
        }
    }

    /// Instruction handed to whatever assembles the next response.
    pub fn directive(&self) -> &'static str {
        match self {
            SedaMode::LogicMode => {
                "Proceed with normal structural analysis. The user is grounded enough for direct, \
                 analytical feedback."
            }
            SedaMode::HoldingSpace => {
                "Validate before analyzing. Reflect the feeling back first, keep analysis gentle \
                 and brief, and anchor it in concrete daily life."
            }
            SedaMode::CrisisMode => {
                "Stop all analysis. Respond only with grounding: slow breathing, the physical \
                 room, a trusted person to contact now, and local emergency or crisis-line \
                 numbers."
            }
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, SedaMode::CrisisMode)
    }
}

impl std::fmt::Display for SedaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SedaMode::LogicMode => "LOGIC_MODE",
            SedaMode::HoldingSpace => "HOLDING_SPACE",
            SedaMode::CrisisMode => "CRISIS_MODE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SedaAssessment {
    pub score: u8,
    pub status: SedaStatus,
    pub mode: SedaMode,
    pub directive: String,
    pub grounding: usize,
    pub inflation: usize,
    pub distress: usize,
}

/// Gate for any step that consumes user text.
#[derive(Debug, Clone)]
pub struct SafetyBreaker {
    grounding: MarkerSet,
    inflation: MarkerSet,
    distress: MarkerSet,
}

impl SafetyBreaker {
    pub fn new() -> Result<Self, TextError> {
        Self::with_terms(GROUNDING_TERMS, INFLATION_TERMS, DISTRESS_TERMS)
    }

    pub fn with_terms(
        grounding: &[&str],
        inflation: &[&str],
        distress: &[&str],
    ) -> Result<Self, TextError> {
        Ok(Self {
            grounding: MarkerSet::unweighted("grounding", grounding)?,
            inflation: MarkerSet::unweighted("inflation", inflation)?,
            distress: MarkerSet::unweighted("distress", distress)?,
        })
    }

    pub fn shared() -> Result<&'static SafetyBreaker, TextError> {
        static SHARED: OnceLock<Result<SafetyBreaker, TextError>> = OnceLock::new();
        SHARED.get_or_init(SafetyBreaker::new).as_ref().map_err(Clone::clone)
    }

    pub fn assess(&self, text: &str) -> SedaAssessment {
        let grounding = self.grounding.scan(text).occurrences();
        let inflation = self.inflation.scan(text).occurrences();
        let distress = self.distress.scan(text).occurrences();

        let raw = SEDA_BASELINE + inflation as i64 * INFLATION_WEIGHT
            + distress as i64 * DISTRESS_WEIGHT
            - grounding as i64 * GROUNDING_WEIGHT;
        let score = raw.clamp(0, 100) as u8;
        let status = SedaStatus::from_score(score);
        let mode = SedaMode::from_score(score);

        if mode.is_crisis() {
            warn!(score, distress, inflation, "Safety breaker tripped");
        } else {
            debug!(score, grounding, inflation, distress, %mode, "Safety assessed");
        }

        SedaAssessment {
            score,
            status,
            mode,
            directive: mode.directive().to_string(),
            grounding,
            inflation,
            distress,
        }
    }
}

/// Assess `text` with the built-in term lists.
pub fn assess(text: &str) -> Result<SedaAssessment, TextError> {
    Ok(SafetyBreaker::shared()?.assess(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_safe() {
        let result = assess("The sky is blue today").unwrap();
        assert_eq!(result.score, 50);
        assert_eq!(result.status, SedaStatus::Safe);
        assert_eq!(result.mode, SedaMode::LogicMode);
        assert_eq!(result.directive, SedaMode::LogicMode.directive());
    }

    #[test]
    fn test_distress_trips_crisis() {
        let text =
            "I feel hopeless and worthless, I can't go on, I want to die, no way out, all alone";
        let result = assess(text).unwrap();
        // 6 distress terms -> 50 + 18
        assert_eq!(result.distress, 6);
        assert_eq!(result.score, 68);
        assert_eq!(result.mode, SedaMode::HoldingSpace);

        let result = assess(&format!("{text}. Everything is empty, I'm panicking")).unwrap();
        assert_eq!(result.distress, 8);
        assert_eq!(result.score, 74);

        let result = assess(&format!("{text}. Empty. Panic. Suicidal. Giving up.")).unwrap();
        assert_eq!(result.score, 80);
        assert_eq!(result.status, SedaStatus::Caution);
        assert_eq!(result.mode, SedaMode::CrisisMode);
        assert!(result.directive.contains("Stop all analysis"));
    }

    #[test]
    fn test_inflation_weighs_most() {
        let result =
            assess("I am the chosen prophet of a cosmic destiny, I have ascended").unwrap();
        assert_eq!(result.inflation, 5);
        assert_eq!(result.score, 75);
        assert_eq!(result.mode, SedaMode::HoldingSpace);
        assert_eq!(result.status, SedaStatus::Caution);
    }

    #[test]
    fn test_grounding_pulls_down_and_clamps() {
        let result = assess("Went to work, ate lunch, walked the dog after dinner, called a friend")
            .unwrap();
        // "walked" is not "walk"
        assert_eq!(result.grounding, 5);
        assert_eq!(result.score, 30);

        let many =
            "work sleep dinner gym rent bills doctor family school kids shower budget lunch";
        let result = assess(many).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.status, SedaStatus::Safe);
    }

    #[test]
    fn test_score_saturates_at_100() {
        let text = "chosen destiny prophet cosmic enlightened awakened ascended transcend \
                    simulation suicidal hopeless";
        let result = assess(text).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.status, SedaStatus::Danger);
        assert_eq!(result.mode, SedaMode::CrisisMode);
    }

    #[test]
    fn test_bands() {
        assert_eq!(SedaStatus::from_score(81), SedaStatus::Danger);
        assert_eq!(SedaStatus::from_score(80), SedaStatus::Caution);
        assert_eq!(SedaStatus::from_score(50), SedaStatus::Safe);
        assert_eq!(SedaMode::from_score(76), SedaMode::CrisisMode);
        assert_eq!(SedaMode::from_score(75), SedaMode::HoldingSpace);
        assert_eq!(SedaMode::from_score(51), SedaMode::HoldingSpace);
        assert_eq!(SedaMode::from_score(50), SedaMode::LogicMode);
    }

    #[test]
    fn test_idempotent() {
        let text = "overwhelmed at work, panic before class";
        assert_eq!(assess(text).unwrap(), assess(text).unwrap());
    }

    #[test]
    fn test_empty_term_list_rejected() {
        assert!(matches!(
            SafetyBreaker::with_terms(GROUNDING_TERMS, &[], DISTRESS_TERMS),
            Err(TextError::EmptyMarkerTable { .. })
        ));
    }

    #[test]
    fn test_serializes_mode() {
        let json = serde_json::to_value(assess("hello").unwrap()).unwrap();
        assert_eq!(json["mode"], "LOGIC_MODE");
        assert_eq!(json["status"], "SAFE");
    }
}
