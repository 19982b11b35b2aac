use serde::{Deserialize, Serialize};

/// A named angular relationship between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        }
    }
}

impl std::fmt::Display for AspectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    Hard,
    Soft,
    Neutral,
}

impl std::fmt::Display for Nature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Nature::Hard => "hard",
            Nature::Soft => "soft",
            Nature::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// The aspect found between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub aspect: AspectKind,
    /// Circular separation in degrees, `[0, 180]`.
    pub distance: f64,
    /// How far `distance` sits from the exact aspect angle.
    pub deviation: f64,
    pub nature: Nature,
    /// Positive for tension, negative for flow.
    pub weight: f64,
}

impl AspectMatch {
    pub fn is_hard(&self) -> bool {
        self.nature == Nature::Hard
    }

    pub fn is_soft(&self) -> bool {
        self.nature == Nature::Soft
    }
}
