//! Third-party triangulation in a relationship triad.
//!
//! Given a pair (A, B) and their friction score, measures how smoothly a third
//! person C connects to each side and classifies C's structural role.

use serde::{Deserialize, Serialize};
use tracing::debug;

use helix_core::aspect::detect_aspect;
use helix_core::model::{AspectKind, AspectMatch, Blueprint, Body, Nature};

use crate::error::RelationalError;
use crate::friction::longitude;

/// Below this pair friction the triad is not evaluated.
pub const TRIANGULATION_THRESHOLD: u8 = 40;

pub const RESONANCE_BASELINE: i32 = 50;

const RESONANCE_BODIES: [Body; 5] = [Body::Sun, Body::Moon, Body::Mars, Body::Venus, Body::Mercury];

const MOON_MARS_BONUS: i32 = 10;

const STRONG_RESONANCE: u8 = 60;
const DISSONANT_BELOW: u8 = 35;
const MILD_RESONANCE_ABOVE: u8 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriangulationRole {
    Stabilizer,
    Scapegoat,
    None,
}

impl std::fmt::Display for TriangulationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TriangulationRole::Stabilizer => "STABILIZER",
            TriangulationRole::Scapegoat => "SCAPEGOAT",
            TriangulationRole::None => "NONE",
        };
        f.write_str(s)
    }
}

/// A member of the primary pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangulationResult {
    pub resonance_a: u8,
    pub resonance_b: u8,
    /// The pair's Mars-Mars aspect, if any.
    pub conflict_axis: Option<AspectMatch>,
    pub role: TriangulationRole,
    /// Set for the weaker stabilizer branch (both sides above 45, not both above 60).
    #[serde(default)]
    pub mild: bool,
    /// For a scapegoat, the side the third person resonates with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligned_with: Option<Side>,
    pub impact: String,
    pub risk: String,
    pub recommendation: String,
}

/// Classification branch; each carries its own fixed texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    BelowThreshold,
    Stabilizer,
    Scapegoat(Side),
    MildStabilizer,
    Unentangled,
}

impl Branch {
    fn classify(resonance_a: u8, resonance_b: u8) -> Self {
        let strong_a = resonance_a >= STRONG_RESONANCE;
        let strong_b = resonance_b >= STRONG_RESONANCE;
        if strong_a && strong_b {
            Branch::Stabilizer
        } else if strong_a && resonance_b < DISSONANT_BELOW {
            Branch::Scapegoat(Side::A)
        } else if strong_b && resonance_a < DISSONANT_BELOW {
            Branch::Scapegoat(Side::B)
        } else if resonance_a > MILD_RESONANCE_ABOVE && resonance_b > MILD_RESONANCE_ABOVE {
            Branch::MildStabilizer
        } else {
            Branch::Unentangled
        }
    }

    fn role(&self) -> TriangulationRole {
        match self {
            Branch::Stabilizer | Branch::MildStabilizer => TriangulationRole::Stabilizer,
            Branch::Scapegoat(_) => TriangulationRole::Scapegoat,
            Branch::BelowThreshold | Branch::Unentangled => TriangulationRole::None,
        }
    }

    /// (impact, risk, recommendation)
    fn texts(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Branch::BelowThreshold => (
                "The primary pair is stable; there is no excess tension for a third person to \
                 absorb.",
                "Low. Outside relationships are not carrying load for this pair.",
                "No triangulation work needed. Keep the pair's direct channel open.",
            ),
            Branch::Stabilizer => (
                "Acts as a relief valve: both partners discharge tension through this person, so \
                 the pair feels calmer whenever they are around.",
                "The pair outsources repair. When the stabilizer is absent, the unprocessed \
                 friction returns at full strength, and the stabilizer quietly burns out carrying \
                 both burdens.",
                "Notice when conversations route through the third person. Bring the charged \
                 topics back into the pair directly and let the stabilizer stay a friend, not a \
                 buffer.",
            ),
            Branch::MildStabilizer => (
                "A gentle buffer: this person softens the pair's friction without being pulled \
                 deep into it.",
                "Moderate. Reliance can grow slowly during high-stress periods.",
                "Enjoy the ease this person brings, and check that hard conversations still happen \
                 between the two partners.",
            ),
            Branch::Scapegoat(_) => (
                "Aligned with one partner and dissonant with the other: the pair's conflict \
                 gets redirected onto this person, who becomes the visible problem.",
                "High. The real friction inside the pair goes unaddressed while loyalty splits \
                 and blame hardens around the third person.",
                "Name the pattern. The aligned partner should stop recruiting support against \
                 the other; the pair should address its own conflict axis before judging the \
                 third person.",
            ),
            Branch::Unentangled => (
                "No structural entanglement: this person neither absorbs nor amplifies the pair's \
                 friction.",
                "Low from this person; the pair's tension remains theirs to work with.",
                "Address the pair's friction directly; a third party will not shift it here.",
            ),
        }
    }
}

/// Classify the third person's role in the triad (A, B, C).
pub fn detect_triangulation(
    pair_friction: u8,
    a: &Blueprint,
    b: &Blueprint,
    c: &Blueprint,
) -> Result<TriangulationResult, RelationalError> {
    if pair_friction < TRIANGULATION_THRESHOLD {
        debug!(pair_friction, "Pair below triangulation threshold");
        let base = RESONANCE_BASELINE as u8;
        return Ok(build(Branch::BelowThreshold, base, base, None));
    }

    let resonance_a = resonance(c, a, 'A')?;
    let resonance_b = resonance(c, b, 'B')?;
    let conflict_axis = detect_aspect(
        longitude(a, 'A', Body::Mars)?,
        longitude(b, 'B', Body::Mars)?,
    )?;
    let branch = Branch::classify(resonance_a, resonance_b);
    debug!(resonance_a, resonance_b, ?branch, "Triangulation classified");

    Ok(build(branch, resonance_a, resonance_b, conflict_axis))
}

fn build(
    branch: Branch,
    resonance_a: u8,
    resonance_b: u8,
    conflict_axis: Option<AspectMatch>,
) -> TriangulationResult {
    let (impact, risk, recommendation) = branch.texts();
    TriangulationResult {
        resonance_a,
        resonance_b,
        conflict_axis,
        role: branch.role(),
        mild: branch == Branch::MildStabilizer,
        aligned_with: match branch {
            Branch::Scapegoat(side) => Some(side),
            _ => None,
        },
        impact: impact.to_string(),
        risk: risk.to_string(),
        recommendation: recommendation.to_string(),
    }
}

/// Geometric smoothness between the third person and one partner, 0..=100.
fn resonance(third: &Blueprint, partner: &Blueprint, side: char) -> Result<u8, RelationalError> {
    let mut score = RESONANCE_BASELINE;
    for body in RESONANCE_BODIES {
        let from = longitude(third, 'C', body)?;
        let to = longitude(partner, side, body)?;
        if let Some(m) = detect_aspect(from, to)? {
            score += resonance_delta(&m);
        }
    }

    let moon = longitude(third, 'C', Body::Moon)?;
    let mars = longitude(partner, side, Body::Mars)?;
    if detect_aspect(moon, mars)?.is_some_and(|m| m.is_soft()) {
        score += MOON_MARS_BONUS;
    }

    Ok(score.clamp(0, 100) as u8)
}

fn resonance_delta(m: &AspectMatch) -> i32 {
    match (m.nature, m.aspect) {
        (Nature::Soft, AspectKind::Trine) => 12,
        (Nature::Soft, _) => 8,
        (Nature::Hard, AspectKind::Opposition) => -8,
        (Nature::Hard, _) => -5,
        (Nature::Neutral, _) => 5,
    }
}
