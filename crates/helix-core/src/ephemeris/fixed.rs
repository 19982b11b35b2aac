use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{Ephemeris, EphemerisError};
use crate::model::Body;

/// An ephemeris answering from a fixed table, whatever the instant.
///
/// Useful when positions were computed elsewhere, and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    positions: BTreeMap<Body, f64>,
}

impl FixedEphemeris {
    pub fn new(positions: impl IntoIterator<Item = (Body, f64)>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Every body at the same longitude.
    pub fn uniform(degrees: f64) -> Self {
        Self::new(Body::ALL.map(|b| (b, degrees)))
    }

    pub fn set(&mut self, body: Body, degrees: f64) -> &mut Self {
        self.positions.insert(body, degrees);
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn longitude(&self, body: Body, _instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.positions
            .get(&body)
            .copied()
            .ok_or(EphemerisError::Unavailable { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_lookup() {
        let eph = FixedEphemeris::new([(Body::Sun, 12.5)]);
        assert_eq!(eph.longitude(Body::Sun, Utc::now()).unwrap(), 12.5);
        assert_eq!(
            eph.longitude(Body::Moon, Utc::now()).unwrap_err(),
            EphemerisError::Unavailable { body: Body::Moon }
        );
    }

    #[test]
    fn test_uniform_covers_all_bodies() {
        let mut eph = FixedEphemeris::uniform(90.0);
        eph.set(Body::Saturn, 45.0);
        for body in Body::ALL {
            assert!(eph.longitude(body, Utc::now()).is_ok());
        }
        assert_eq!(eph.longitude(Body::Saturn, Utc::now()).unwrap(), 45.0);
    }
}
