//! Fixed lookup tables for gate and center derivation.

use crate::error::CoreError;
use crate::model::body::normalize_degrees;
use crate::model::Center;

/// Number of gates on the wheel.
pub const GATE_COUNT: u8 = 64;

/// Width of one gate in degrees.
pub const GATE_SPAN: f64 = 360.0 / GATE_COUNT as f64;

/// Rotation applied before partitioning: longitude 302 lands on gate 1.
pub const GATE_OFFSET: f64 = 58.0;

/// Map an ecliptic longitude to a gate in `1..=64`.
pub fn gate_for_longitude(longitude: f64) -> Result<u8, CoreError> {
    if !longitude.is_finite() {
        return Err(CoreError::InvalidAngle {
            field: "longitude",
            value: longitude,
        });
    }
    let rotated = normalize_degrees(longitude + GATE_OFFSET);
    let index = (rotated / GATE_SPAN).floor() as u8;
    Ok(index.min(GATE_COUNT - 1) + 1)
}

/// Gates belonging to each center. Every gate belongs to exactly one center.
pub fn center_gates(center: Center) -> &'static [u8] {
    match center {
        Center::Head => &[64, 61, 63],
        Center::Ajna => &[47, 24, 4, 17, 43, 11],
        Center::Throat => &[62, 23, 56, 35, 12, 45, 33, 8, 31, 20, 16],
        Center::G => &[1, 13, 25, 46, 2, 15, 10, 7],
        Center::Heart => &[21, 40, 26, 51],
        Center::Sacral => &[5, 14, 29, 59, 9, 3, 42, 27, 34],
        Center::SolarPlexus => &[6, 37, 22, 36, 30, 55, 49],
        Center::Spleen => &[48, 57, 44, 50, 32, 28, 18],
        Center::Root => &[53, 60, 52, 19, 39, 41, 58, 38, 54],
    }
}

/// The center that owns a gate.
pub fn center_of_gate(gate: u8) -> Option<Center> {
    Center::ALL
        .into_iter()
        .find(|c| center_gates(*c).contains(&gate))
}

/// Fixed insight for a center that one person carries and the other lacks.
pub fn conditioning_insight(center: Center) -> &'static str {
    match center {
        Center::Head => {
            "Sets the questions the other keeps thinking about; pressure to figure things out \
             can feel borrowed."
        }
        Center::Ajna => {
            "Brings fixed ways of seeing; the other may adopt certainty that is not their own."
        }
        Center::Throat => {
            "Sets the pace of expression; the other may feel pushed to speak or act to be noticed."
        }
        Center::G => {
            "Carries a steady sense of direction; the other may lose or borrow their own \
             bearings nearby."
        }
        Center::Heart => {
            "Makes promises and pushes willpower; the other may feel they have something to prove."
        }
        Center::Sacral => {
            "Radiates steady life-force; the other can overwork on amplified energy that is \
             not sustainable."
        }
        Center::SolarPlexus => {
            "Broadcasts emotional waves; the other amplifies feelings that did not start with them."
        }
        Center::Spleen => {
            "Holds steady instinct and wellbeing; the other may cling to the feeling of safety \
             it provides."
        }
        Center::Root => {
            "Generates adrenal pressure; the other may rush to relieve stress that is not theirs."
        }
    }
}
