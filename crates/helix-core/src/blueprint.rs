use std::collections::BTreeSet;

use tracing::debug;

use crate::ephemeris::{Ephemeris, EphemerisError};
use crate::error::CoreError;
use crate::model::{
    Authority, BirthMoment, Blueprint, Body, Center, CenterMap, HumanType, PlanetaryLongitudes,
};
use crate::tables::{center_gates, gate_for_longitude};

/// Computes blueprints from birth moments using an injected ephemeris.
#[derive(Debug, Clone)]
pub struct BlueprintCalculator<E> {
    ephemeris: E,
}

impl<E: Ephemeris> BlueprintCalculator<E> {
    pub fn new(ephemeris: E) -> Self {
        Self { ephemeris }
    }

    /// Parse raw date/time strings, then calculate. Parse errors surface
    /// before the ephemeris is consulted.
    pub fn calculate_str(&self, date: &str, time: Option<&str>) -> Result<Blueprint, CoreError> {
        let birth = BirthMoment::parse(date, time)?;
        self.calculate(&birth)
    }

    pub fn calculate(&self, birth: &BirthMoment) -> Result<Blueprint, CoreError> {
        let instant = birth.instant();
        let mut longitudes = PlanetaryLongitudes::new();
        for body in Body::ALL {
            let value = self.ephemeris.longitude(body, instant)?;
            if !value.is_finite() || !(0.0..360.0).contains(&value) {
                return Err(EphemerisError::InvalidLongitude { body, value }.into());
            }
            longitudes.insert(body, value)?;
        }
        debug!(%birth, "Ephemeris returned {} longitudes", longitudes.len());
        blueprint_from_longitudes(*birth, longitudes)
    }
}

/// Derive a blueprint from already known longitudes.
pub fn blueprint_from_longitudes(
    birth: BirthMoment,
    longitudes: PlanetaryLongitudes,
) -> Result<Blueprint, CoreError> {
    let gates = derive_gates(&longitudes)?;
    let centers = derive_centers(&gates);
    let kind = infer_type(&centers);
    let authority = infer_authority(&centers);
    debug!(
        ?gates,
        active_centers = centers.active_count(),
        %kind,
        %authority,
        "Derived blueprint"
    );
    Ok(Blueprint {
        birth,
        longitudes,
        gates,
        centers,
        kind,
        strategy: kind.strategy(),
        authority,
    })
}

/// One gate per longitude, deduplicated and sorted.
pub fn derive_gates(longitudes: &PlanetaryLongitudes) -> Result<BTreeSet<u8>, CoreError> {
    longitudes
        .iter()
        .map(|(_, lon)| gate_for_longitude(lon))
        .collect()
}

/// A center is active when any of its gates is present.
pub fn derive_centers(gates: &BTreeSet<u8>) -> CenterMap {
    let mut centers = CenterMap::empty();
    for center in Center::ALL {
        let active = center_gates(center).iter().any(|g| gates.contains(g));
        centers.set(center, active);
    }
    centers
}

pub fn infer_type(centers: &CenterMap) -> HumanType {
    let sacral = centers.is_active(Center::Sacral);
    let throat = centers.is_active(Center::Throat);
    let motor = centers.is_active(Center::Heart) || centers.is_active(Center::SolarPlexus);

    if sacral && throat {
        HumanType::ManifestingGenerator
    } else if sacral {
        HumanType::Generator
    } else if throat && motor {
        HumanType::Manifestor
    } else if centers.active_count() > 0 {
        HumanType::Projector
    } else {
        HumanType::Reflector
    }
}

pub fn infer_authority(centers: &CenterMap) -> Authority {
    if centers.is_active(Center::SolarPlexus) {
        Authority::Emotional
    } else if centers.is_active(Center::Sacral) {
        Authority::Sacral
    } else if centers.is_active(Center::Spleen) {
        Authority::Splenic
    } else if centers.is_active(Center::Heart) {
        Authority::Ego
    } else if centers.is_active(Center::G) {
        Authority::SelfProjected
    } else if centers.is_active(Center::Head) || centers.is_active(Center::Ajna) {
        Authority::Mental
    } else {
        Authority::Lunar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{FixedEphemeris, MeanElementEphemeris};
    use crate::model::Strategy;
    use crate::tables::{GATE_OFFSET, GATE_SPAN};

    /// Longitude at the middle of a gate.
    fn lon_for_gate(gate: u8) -> f64 {
        (f64::from(gate - 1) * GATE_SPAN + GATE_SPAN / 2.0 - GATE_OFFSET).rem_euclid(360.0)
    }

    fn fixed(gates: [u8; 7]) -> FixedEphemeris {
        FixedEphemeris::new(
            Body::ALL
                .into_iter()
                .zip(gates)
                .map(|(b, g)| (b, lon_for_gate(g))),
        )
    }

    fn centers_with(active: &[Center]) -> CenterMap {
        let mut map = CenterMap::empty();
        for c in active {
            map.set(*c, true);
        }
        map
    }

    #[test]
    fn test_lon_for_gate_helper() {
        for gate in 1..=64 {
            assert_eq!(gate_for_longitude(lon_for_gate(gate)).unwrap(), gate);
        }
    }

    #[test]
    fn test_gates_are_deduplicated() {
        let calc = BlueprintCalculator::new(fixed([34, 34, 20, 20, 1, 1, 1]));
        let bp = calc.calculate_str("1990-01-01", None).unwrap();
        assert_eq!(bp.gates.into_iter().collect::<Vec<_>>(), vec![1, 20, 34]);
    }

    #[test]
    fn test_manifesting_generator() {
        // 34 sacral, 20 throat, 6 solar plexus
        let calc = BlueprintCalculator::new(fixed([34, 20, 6, 1, 1, 1, 1]));
        let bp = calc.calculate_str("1990-01-01", Some("06:00")).unwrap();
        assert_eq!(bp.kind, HumanType::ManifestingGenerator);
        assert_eq!(bp.strategy, Strategy::RespondThenInform);
        assert_eq!(bp.authority, Authority::Emotional);
        assert!(bp.centers.is_active(Center::G));
        assert!(!bp.centers.is_active(Center::Head));
    }

    #[test]
    fn test_type_priority() {
        assert_eq!(
            infer_type(&centers_with(&[Center::Sacral])),
            HumanType::Generator
        );
        assert_eq!(
            infer_type(&centers_with(&[Center::Throat, Center::Heart])),
            HumanType::Manifestor
        );
        assert_eq!(
            infer_type(&centers_with(&[Center::Throat, Center::SolarPlexus])),
            HumanType::Manifestor
        );
        assert_eq!(
            infer_type(&centers_with(&[Center::Throat, Center::G])),
            HumanType::Projector
        );
        assert_eq!(infer_type(&CenterMap::empty()), HumanType::Reflector);
    }

    #[test]
    fn test_authority_priority() {
        let all: Vec<Center> = Center::ALL.to_vec();
        assert_eq!(infer_authority(&centers_with(&all)), Authority::Emotional);
        assert_eq!(
            infer_authority(&centers_with(&[Center::Sacral, Center::Spleen])),
            Authority::Sacral
        );
        assert_eq!(
            infer_authority(&centers_with(&[Center::Spleen, Center::Heart])),
            Authority::Splenic
        );
        assert_eq!(
            infer_authority(&centers_with(&[Center::Heart, Center::G])),
            Authority::Ego
        );
        assert_eq!(
            infer_authority(&centers_with(&[Center::G, Center::Ajna])),
            Authority::SelfProjected
        );
        assert_eq!(
            infer_authority(&centers_with(&[Center::Head])),
            Authority::Mental
        );
        assert_eq!(
            infer_authority(&centers_with(&[Center::Root])),
            Authority::Lunar
        );
    }

    #[test]
    fn test_parse_error_before_ephemeris() {
        // an empty ephemeris would fail, but the parse error must come first
        let calc = BlueprintCalculator::new(FixedEphemeris::default());
        let err = calc.calculate_str("1990/01/01", None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { .. }));
        let err = calc.calculate_str("1990-01-01", Some("25:00")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTime { .. }));
    }

    #[test]
    fn test_ephemeris_errors_propagate() {
        let mut eph = FixedEphemeris::uniform(10.0);
        let calc = BlueprintCalculator::new(FixedEphemeris::new([(Body::Sun, 1.0)]));
        let err = calc.calculate_str("1990-01-01", None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Ephemeris(EphemerisError::Unavailable { body: Body::Moon })
        ));

        eph.set(Body::Venus, 400.0);
        let err = BlueprintCalculator::new(eph)
            .calculate_str("1990-01-01", None)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Ephemeris(EphemerisError::InvalidLongitude {
                body: Body::Venus,
                ..
            })
        ));
    }

    #[test]
    fn test_deterministic() {
        let calc = BlueprintCalculator::new(MeanElementEphemeris::new());
        let a = calc.calculate_str("1984-09-23", Some("17:45")).unwrap();
        let b = calc.calculate_str("1984-09-23", Some("17:45")).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_gates_follow_longitudes_not_date() {
        let calc = BlueprintCalculator::new(MeanElementEphemeris::new());
        let morning = calc.calculate_str("1992-03-15", Some("00:00")).unwrap();
        let evening = calc.calculate_str("1992-03-15", Some("12:00")).unwrap();
        let moon_m = morning.longitudes.get(Body::Moon).unwrap();
        let moon_e = evening.longitudes.get(Body::Moon).unwrap();
        assert_ne!(
            gate_for_longitude(moon_m).unwrap(),
            gate_for_longitude(moon_e).unwrap()
        );
        assert_eq!(morning.birth.date, evening.birth.date);
    }

    #[test]
    fn test_blueprint_serializes_type_field() {
        let calc = BlueprintCalculator::new(fixed([34, 20, 6, 1, 1, 1, 1]));
        let bp = calc.calculate_str("1990-01-01", None).unwrap();
        let json = serde_json::to_value(&bp).unwrap();
        assert_eq!(json["type"], "MANIFESTING_GENERATOR");
        assert_eq!(json["authority"], "emotional");
        assert_eq!(json["centers"]["sacral"], true);
    }
}
