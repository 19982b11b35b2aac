use crate::error::CoreError;
use crate::model::body::normalize_degrees;
use crate::model::{AspectKind, AspectMatch, Nature};

/// One row of the aspect table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDef {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
    pub nature: Nature,
    pub weight: f64,
}

/// Recognised aspects, checked in this order. The first row whose orb
/// contains the separation wins.
pub const ASPECT_TABLE: [AspectDef; 5] = [
    AspectDef {
        kind: AspectKind::Conjunction,
        angle: 0.0,
        orb: 8.0,
        nature: Nature::Neutral,
        weight: 0.5,
    },
    AspectDef {
        kind: AspectKind::Sextile,
        angle: 60.0,
        orb: 5.0,
        nature: Nature::Soft,
        weight: -0.5,
    },
    AspectDef {
        kind: AspectKind::Square,
        angle: 90.0,
        orb: 6.0,
        nature: Nature::Hard,
        weight: 1.0,
    },
    AspectDef {
        kind: AspectKind::Trine,
        angle: 120.0,
        orb: 6.0,
        nature: Nature::Soft,
        weight: -1.0,
    },
    AspectDef {
        kind: AspectKind::Opposition,
        angle: 180.0,
        orb: 8.0,
        nature: Nature::Hard,
        weight: 0.8,
    },
];

/// Shortest circular distance between two angles, in `[0, 180]`.
pub fn separation(a: f64, b: f64) -> Result<f64, CoreError> {
    check_finite("first angle", a)?;
    check_finite("second angle", b)?;
    let d = (normalize_degrees(a) - normalize_degrees(b)).abs() % 360.0;
    Ok(if d > 180.0 { 360.0 - d } else { d })
}

/// Match two positions against [`ASPECT_TABLE`].
pub fn detect_aspect(a: f64, b: f64) -> Result<Option<AspectMatch>, CoreError> {
    detect_aspect_with(&ASPECT_TABLE, a, b)
}

/// Match two positions against a caller-supplied table, first match wins.
pub fn detect_aspect_with(
    table: &[AspectDef],
    a: f64,
    b: f64,
) -> Result<Option<AspectMatch>, CoreError> {
    let distance = separation(a, b)?;
    let found = table.iter().find_map(|def| {
        let deviation = (distance - def.angle).abs();
        (deviation <= def.orb).then_some(AspectMatch {
            aspect: def.kind,
            distance,
            deviation,
            nature: def.nature,
            weight: def.weight,
        })
    });
    Ok(found)
}

fn check_finite(field: &'static str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidAngle { field, value })
    }
}
