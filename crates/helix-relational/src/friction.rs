use serde::{Deserialize, Serialize};
use tracing::debug;

use helix_core::aspect::detect_aspect;
use helix_core::model::{AspectMatch, Blueprint, Body};

use crate::conditioning::{conditioning_between, ConditioningEntry};
use crate::error::RelationalError;

/// Score every pair report is centred on.
pub const FRICTION_BASELINE: f64 = 50.0;

/// Scores above this are high friction.
pub const HIGH_FRICTION_ABOVE: u8 = 65;

/// Scores below this are resonant flow.
pub const RESONANT_BELOW: u8 = 40;

/// A cross-person planetary pair: `a` from the first person, `b` from the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetPair {
    pub a: Body,
    pub b: Body,
}

impl PlanetPair {
    pub const fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }
}

impl std::fmt::Display for PlanetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(A)-{}(B)", self.a, self.b)
    }
}

/// Pairs compared for friction, with their importance.
pub const FRICTION_PAIRS: [(PlanetPair, f64); 6] = [
    (PlanetPair::new(Body::Sun, Body::Sun), 1.0),
    (PlanetPair::new(Body::Mars, Body::Mars), 1.2),
    (PlanetPair::new(Body::Sun, Body::Mars), 1.0),
    (PlanetPair::new(Body::Mars, Body::Sun), 1.0),
    (PlanetPair::new(Body::Moon, Body::Moon), 0.8),
    (PlanetPair::new(Body::Venus, Body::Mars), 0.7),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrictionClass {
    HighFriction,
    Mixed,
    ResonantFlow,
}

impl FrictionClass {
    pub fn from_score(score: u8) -> Self {
        if score > HIGH_FRICTION_ABOVE {
            FrictionClass::HighFriction
        } else if score >= RESONANT_BELOW {
            FrictionClass::Mixed
        } else {
            FrictionClass::ResonantFlow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrictionClass::HighFriction => "High Friction",
            FrictionClass::Mixed => "Mixed Dynamics",
            FrictionClass::ResonantFlow => "Resonant Flow",
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            FrictionClass::HighFriction => {
                "The core drives grind against each other. Expect sparks around pace, initiative \
                 and control; this friction becomes fuel only when it is named out loud instead of \
                 acted out."
            }
            FrictionClass::Mixed => {
                "Some channels flow and some catch. Ease in daily rhythm sits next to specific \
                 trigger points; learn which pairing is active before assuming the whole bond is \
                 in trouble."
            }
            FrictionClass::ResonantFlow => {
                "The drives largely cooperate. Energy moves between you with little resistance; \
                 the main risk is comfort turning into avoidance of necessary friction."
            }
        }
    }
}

impl std::fmt::Display for FrictionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One matched pair in a friction report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAspect {
    pub pair: PlanetPair,
    pub aspect: AspectMatch,
    pub importance: f64,
    /// `aspect.weight * importance`.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionReport {
    pub score: u8,
    pub classification: FrictionClass,
    pub rationale: String,
    pub aspects: Vec<PairAspect>,
}

/// Friction plus conditioning for a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipReport {
    pub friction: FrictionReport,
    pub conditioning: Vec<ConditioningEntry>,
}

/// Score the friction between two blueprints.
pub fn analyze_friction(a: &Blueprint, b: &Blueprint) -> Result<FrictionReport, RelationalError> {
    let total_importance: f64 = FRICTION_PAIRS.iter().map(|(_, w)| w).sum();
    let mut aspects = Vec::new();
    let mut weighted = 0.0;

    for (pair, importance) in FRICTION_PAIRS {
        let lon_a = longitude(a, 'A', pair.a)?;
        let lon_b = longitude(b, 'B', pair.b)?;
        if let Some(aspect) = detect_aspect(lon_a, lon_b)? {
            let contribution = aspect.weight * importance;
            weighted += contribution;
            aspects.push(PairAspect {
                pair,
                aspect,
                importance,
                contribution,
            });
        }
    }

    let normalized = weighted / total_importance;
    let score = (FRICTION_BASELINE + normalized * FRICTION_BASELINE)
        .clamp(0.0, 100.0)
        .round() as u8;
    let classification = FrictionClass::from_score(score);
    debug!(score, %classification, matched = aspects.len(), "Friction analyzed");

    Ok(FrictionReport {
        score,
        classification,
        rationale: classification.rationale().to_string(),
        aspects,
    })
}

/// Friction and conditioning in one pass.
pub fn analyze_relationship(
    a: &Blueprint,
    b: &Blueprint,
) -> Result<RelationshipReport, RelationalError> {
    Ok(RelationshipReport {
        friction: analyze_friction(a, b)?,
        conditioning: conditioning_between(a, b),
    })
}

pub(crate) fn longitude(bp: &Blueprint, person: char, body: Body) -> Result<f64, RelationalError> {
    bp.longitudes
        .get(body)
        .ok_or(RelationalError::MissingLongitude { person, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{blueprint_at, blueprint_with};
    use helix_core::model::{AspectKind, BirthMoment, PlanetaryLongitudes};

    #[test]
    fn test_all_conjunct_is_high_friction() {
        let report = analyze_friction(&blueprint_at(10.0), &blueprint_at(12.0)).unwrap();
        // every pair conjunct at weight 0.5 -> 50 + 25
        assert_eq!(report.score, 75);
        assert_eq!(report.classification, FrictionClass::HighFriction);
        assert_eq!(report.aspects.len(), 6);
        assert!(report
            .aspects
            .iter()
            .all(|p| p.aspect.aspect == AspectKind::Conjunction));
    }

    #[test]
    fn test_all_square_saturates() {
        let report = analyze_friction(&blueprint_at(0.0), &blueprint_at(90.0)).unwrap();
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_all_trine_is_resonant() {
        let report = analyze_friction(&blueprint_at(0.0), &blueprint_at(120.0)).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.classification, FrictionClass::ResonantFlow);
    }

    #[test]
    fn test_no_aspects_is_baseline_mixed() {
        let report = analyze_friction(&blueprint_at(0.0), &blueprint_at(40.0)).unwrap();
        assert_eq!(report.score, 50);
        assert_eq!(report.classification, FrictionClass::Mixed);
        assert!(report.aspects.is_empty());
    }

    #[test]
    fn test_single_pair_scaled_by_importance() {
        // only Mars(A)-Mars(B) squares: 1.0 * 1.2 / 5.7
        let a = blueprint_with(0.0, &[(Body::Mars, 200.0)]);
        let b = blueprint_with(40.0, &[(Body::Mars, 290.0)]);
        let report = analyze_friction(&a, &b).unwrap();
        assert_eq!(report.aspects.len(), 1);
        assert_eq!(report.aspects[0].pair, PlanetPair::new(Body::Mars, Body::Mars));
        assert!((report.aspects[0].contribution - 1.2).abs() < 1e-9);
        let expected = (50.0 + 1.2 / 5.7 * 50.0_f64).round() as u8;
        assert_eq!(report.score, expected);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(FrictionClass::from_score(66), FrictionClass::HighFriction);
        assert_eq!(FrictionClass::from_score(65), FrictionClass::Mixed);
        assert_eq!(FrictionClass::from_score(40), FrictionClass::Mixed);
        assert_eq!(FrictionClass::from_score(39), FrictionClass::ResonantFlow);
    }

    #[test]
    fn test_missing_longitude_fails() {
        let full = blueprint_at(0.0);
        let mut partial = blueprint_at(0.0);
        partial.longitudes = [(Body::Sun, 0.0)].into_iter().collect::<PlanetaryLongitudes>();
        partial.birth = BirthMoment::parse("2001-01-01", None).unwrap();
        let err = analyze_friction(&full, &partial).unwrap_err();
        assert!(matches!(
            err,
            RelationalError::MissingLongitude {
                person: 'B',
                body: Body::Mars
            }
        ));
    }

    #[test]
    fn test_score_always_in_range() {
        let mut deg = 0.0;
        while deg < 360.0 {
            let report = analyze_friction(&blueprint_at(0.0), &blueprint_at(deg)).unwrap();
            assert!(report.score <= 100);
            deg += 3.5;
        }
    }

    #[test]
    fn test_report_serializes_classification() {
        let report = analyze_friction(&blueprint_at(10.0), &blueprint_at(12.0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["classification"], "HIGH_FRICTION");
        assert_eq!(json["aspects"][0]["aspect"]["aspect"], "Conjunction");
    }
}
