use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A body whose ecliptic longitude feeds a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Venus,
    Mercury,
    Jupiter,
    Saturn,
}

impl Body {
    /// Every body, in lookup order.
    pub const ALL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mars,
        Body::Venus,
        Body::Mercury,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Venus => "Venus",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ecliptic longitudes in degrees, `[0, 360)`, keyed by body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetaryLongitudes(BTreeMap<Body, f64>);

impl PlanetaryLongitudes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a longitude, wrapped into `[0, 360)`.
    pub fn insert(&mut self, body: Body, degrees: f64) -> Result<(), CoreError> {
        if !degrees.is_finite() {
            return Err(CoreError::InvalidAngle {
                field: "longitude",
                value: degrees,
            });
        }
        self.0.insert(body, normalize_degrees(degrees));
        Ok(())
    }

    pub fn get(&self, body: Body) -> Option<f64> {
        self.0.get(&body).copied()
    }

    /// Like [`get`](Self::get) but a missing body is an error.
    pub fn require(&self, body: Body) -> Result<f64, CoreError> {
        self.get(body).ok_or(CoreError::MissingLongitude(body))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, f64)> + '_ {
        self.0.iter().map(|(b, d)| (*b, *d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Body, f64)> for PlanetaryLongitudes {
    fn from_iter<I: IntoIterator<Item = (Body, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter(|(_, d)| d.is_finite())
                .map(|(b, d)| (b, normalize_degrees(d)))
                .collect(),
        )
    }
}

/// Wrap any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_wraps_degrees() {
        let mut lons = PlanetaryLongitudes::new();
        lons.insert(Body::Sun, 370.0).unwrap();
        lons.insert(Body::Moon, -30.0).unwrap();
        assert!((lons.get(Body::Sun).unwrap() - 10.0).abs() < 1e-9);
        assert!((lons.get(Body::Moon).unwrap() - 330.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_rejects_nan() {
        let mut lons = PlanetaryLongitudes::new();
        let err = lons.insert(Body::Mars, f64::NAN).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAngle { .. }));
    }

    #[test]
    fn test_require_missing_body() {
        let lons: PlanetaryLongitudes = [(Body::Sun, 1.0)].into_iter().collect();
        assert!(lons.require(Body::Sun).is_ok());
        assert!(matches!(
            lons.require(Body::Venus),
            Err(CoreError::MissingLongitude(Body::Venus))
        ));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let lons: PlanetaryLongitudes = [(Body::Sun, 15.5)].into_iter().collect();
        let json = serde_json::to_string(&lons).unwrap();
        assert_eq!(json, r#"{"sun":15.5}"#);
    }
}
