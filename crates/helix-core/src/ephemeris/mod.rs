//! The ephemeris seam: where planetary longitudes come from.
//!
//! The engine never computes positions itself in its analysis paths; it asks
//! an [`Ephemeris`] and propagates any failure unchanged.

pub mod fixed;
pub mod mean;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::Body;

pub use fixed::FixedEphemeris;
pub use mean::MeanElementEphemeris;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("No position available for {body}")]
    Unavailable { body: Body },

    #[error("Provider returned an invalid longitude for {body}: {value}")]
    InvalidLongitude { body: Body, value: f64 },

    #[error("Ephemeris provider error: {0}")]
    Provider(String),
}

/// Source of geocentric ecliptic longitudes.
pub trait Ephemeris {
    /// Longitude of `body` at `instant`, in degrees `[0, 360)`.
    fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).longitude(body, instant)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).longitude(body, instant)
    }
}
