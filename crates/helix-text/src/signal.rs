use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use helix_core::model::Spectrum;

use crate::error::TextError;
use crate::markers::{word_count, MarkerSet};

/// Per-word scale applied to raw dictionary scores.
const SCORE_SCALE: f64 = 8.0;

/// Words per normalization unit.
const WORDS_PER_UNIT: f64 = 10.0;

pub const ENTROPY_MARKERS: &[(&str, f64)] = &[
    ("whatever", 3.0),
    ("fine", 2.0),
    ("forget it", 3.0),
    ("don't care", 3.0),
    ("never mind", 2.0),
    ("nevermind", 2.0),
    ("leave me alone", 4.0),
    ("shut up", 4.0),
    ("hate", 3.0),
    ("sick of", 3.0),
    ("tired of", 3.0),
    ("done with", 3.0),
    ("you always", 3.0),
    ("you never", 3.0),
    ("your fault", 4.0),
    ("blame", 2.0),
    ("angry", 2.0),
    ("furious", 3.0),
    ("annoyed", 2.0),
    ("ridiculous", 2.0),
    ("stupid", 3.0),
    ("can't stand", 3.0),
    ("pointless", 3.0),
    ("no point", 3.0),
    ("over it", 2.0),
    ("ugh", 1.0),
];

pub const INTEGRATION_MARKERS: &[(&str, f64)] = &[
    ("sorry", 3.0),
    ("apologize", 3.0),
    ("my fault", 3.0),
    ("understand", 2.0),
    ("hear you", 3.0),
    ("thank you", 2.0),
    ("thanks", 1.0),
    ("appreciate", 3.0),
    ("let's talk", 3.0),
    ("work through", 3.0),
    ("work it out", 3.0),
    ("together", 2.0),
    ("my part", 3.0),
    ("i was wrong", 4.0),
    ("forgive", 3.0),
    ("make it right", 3.0),
    ("listen", 2.0),
    ("calm", 1.0),
];

pub const EXPANSION_MARKERS: &[(&str, f64)] = &[
    ("love", 3.0),
    ("excited", 3.0),
    ("grateful", 3.0),
    ("amazing", 2.0),
    ("beautiful", 2.0),
    ("happy", 2.0),
    ("joy", 3.0),
    ("proud", 2.0),
    ("miss you", 2.0),
    ("can't wait", 3.0),
    ("inspired", 3.0),
    ("wonderful", 2.0),
    ("connected", 3.0),
    ("adventure", 2.0),
    ("dream", 2.0),
    ("celebrate", 3.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Density {
    Low,
    Moderate,
    High,
    Critical,
}

impl Density {
    pub fn from_entropy(entropy: u8) -> Self {
        match entropy {
            70.. => Density::Critical,
            45.. => Density::High,
            20.. => Density::Moderate,
            _ => Density::Low,
        }
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Density::Low => "LOW",
            Density::Moderate => "MODERATE",
            Density::High => "HIGH",
            Density::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub entropy: u8,
    pub integration: u8,
    pub expansion: u8,
    pub spectrum: Spectrum,
    pub density: Density,
    pub flag: String,
    pub body: String,
    pub preparation: String,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

impl SignalAnalysis {
    fn silent() -> Self {
        Self {
            entropy: 0,
            integration: 0,
            expansion: 0,
            spectrum: Spectrum::Integration,
            density: Density::Low,
            flag: "No Signal".to_string(),
            body: "There is no text to read yet.".to_string(),
            preparation: "Nothing to prepare for.".to_string(),
            word_count: 0,
            markers: Vec::new(),
        }
    }
}

/// Scores incoming text on the entropy, integration and expansion spectra.
#[derive(Debug, Clone)]
pub struct SignalFilter {
    entropy: MarkerSet,
    integration: MarkerSet,
    expansion: MarkerSet,
}

impl SignalFilter {
    /// Filter with the built-in dictionaries.
    pub fn new() -> Result<Self, TextError> {
        Self::with_dictionaries(ENTROPY_MARKERS, INTEGRATION_MARKERS, EXPANSION_MARKERS)
    }

    pub fn with_dictionaries(
        entropy: &[(&str, f64)],
        integration: &[(&str, f64)],
        expansion: &[(&str, f64)],
    ) -> Result<Self, TextError> {
        Ok(Self {
            entropy: MarkerSet::new("entropy", entropy)?,
            integration: MarkerSet::new("integration", integration)?,
            expansion: MarkerSet::new("expansion", expansion)?,
        })
    }

    /// Process-wide filter over the built-in dictionaries, compiled once.
    pub fn shared() -> Result<&'static SignalFilter, TextError> {
        static SHARED: OnceLock<Result<SignalFilter, TextError>> = OnceLock::new();
        SHARED.get_or_init(SignalFilter::new).as_ref().map_err(Clone::clone)
    }

    pub fn analyze(&self, text: &str) -> SignalAnalysis {
        let words = word_count(text);
        if words == 0 {
            return SignalAnalysis::silent();
        }
        let divisor = (words as f64 / WORDS_PER_UNIT).max(1.0);
        let score = |raw: f64| (raw / divisor * SCORE_SCALE).clamp(0.0, 100.0).round() as u8;

        let entropy_scan = self.entropy.scan(text);
        let integration_scan = self.integration.scan(text);
        let expansion_scan = self.expansion.scan(text);

        let entropy = score(entropy_scan.weighted());
        let integration = score(integration_scan.weighted());
        let expansion = score(expansion_scan.weighted());

        let spectrum = dominant(entropy, integration, expansion);
        let density = Density::from_entropy(entropy);
        let reading = read(spectrum, density, entropy, integration);
        debug!(words, entropy, integration, expansion, %spectrum, %density, "Signal analyzed");

        let markers = entropy_scan
            .terms()
            .chain(integration_scan.terms())
            .chain(expansion_scan.terms())
            .map(str::to_string)
            .collect();

        SignalAnalysis {
            entropy,
            integration,
            expansion,
            spectrum,
            density,
            flag: reading.flag.to_string(),
            body: reading.body.to_string(),
            preparation: reading.preparation.to_string(),
            word_count: words,
            markers,
        }
    }
}

/// The strictly greatest spectrum; ties fall back to integration.
fn dominant(entropy: u8, integration: u8, expansion: u8) -> Spectrum {
    if entropy > integration && entropy > expansion {
        Spectrum::Entropy
    } else if expansion > entropy && expansion > integration {
        Spectrum::Expansion
    } else {
        Spectrum::Integration
    }
}

struct Reading {
    flag: &'static str,
    body: &'static str,
    preparation: &'static str,
}

fn read(spectrum: Spectrum, density: Density, entropy: u8, integration: u8) -> Reading {
    match spectrum {
        Spectrum::Entropy => match density {
            Density::Critical => Reading {
                flag: "High Static",
                body: "This message carries a heavy conflict charge. Read it as a weather report \
                       about the sender's state, not a verdict about you.",
                preparation: "Ground first. Breathe, feel your feet on the floor, and give it at \
                              least an hour before you reply.",
            },
            Density::High => Reading {
                flag: "Elevated Static",
                body: "Frustration is running close to the surface. Some of it is aimed at you, \
                       most of it is aimed at the situation.",
                preparation: "Answer the need, not the tone. Keep your reply short and concrete.",
            },
            Density::Moderate | Density::Low => Reading {
                flag: "Guarded Signal",
                body: "Short, closed phrasing often masks something unsaid. The words say done; \
                       the energy says unheard.",
                preparation: "Respond to the feeling underneath. A simple 'I'm here when you want \
                              to talk' lands better than a debate.",
            },
        },
        Spectrum::Integration if integration >= 40 => Reading {
            flag: "Repair Attempt",
            body: "The sender is reaching toward repair. There is a bid for connection in here.",
            preparation: "Meet the bid. Acknowledge it before adding your own point.",
        },
        Spectrum::Integration if integration > 0 && density >= Density::Moderate => Reading {
            flag: "Mixed Signal",
            body: "Repair language sits alongside friction. The sender wants resolution but is \
                   still carrying some heat.",
            preparation: "Name the good intent you can see, then address the sharp edge calmly.",
        },
        Spectrum::Integration if density >= Density::Moderate => Reading {
            flag: "Split Signal",
            body: "Warmth and friction arrive in equal measure with no repair language between \
                   them. The sender may not know which one they mean yet.",
            preparation: "Ask which part matters most to them before responding to either.",
        },
        Spectrum::Integration => Reading {
            flag: "Neutral Signal",
            body: "No strong charge detected. Read it at face value.",
            preparation: "No special preparation needed.",
        },
        Spectrum::Expansion if entropy >= 45 => Reading {
            flag: "Charged Enthusiasm",
            body: "Warmth and strain arrive together. The excitement is real, and so is the \
                   pressure behind it.",
            preparation: "Celebrate what is good first, then check in on what is weighing on them.",
        },
        Spectrum::Expansion => Reading {
            flag: "Open Signal",
            body: "The message carries warmth and connection.",
            preparation: "Let it land. Receiving good news fully is part of the relationship too.",
        },
    }
}
