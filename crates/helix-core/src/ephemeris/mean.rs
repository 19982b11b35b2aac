//! Low-precision positions from mean orbital elements.
//!
//! Good to roughly a degree for the Sun and planets and a little worse for the
//! Moon, which is enough to place a body inside a 5.625 degree gate most of the
//! time. Ignores nutation, aberration, light time and planetary perturbations.

use chrono::{DateTime, Utc};

use super::{Ephemeris, EphemerisError};
use crate::model::body::normalize_degrees;
use crate::model::Body;

/// Unix epoch expressed in days relative to 1999-12-31T00:00 UT, the element epoch.
const UNIX_EPOCH_DAY: f64 = -10956.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementEphemeris;

impl MeanElementEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for MeanElementEphemeris {
    fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let d = day_number(instant);
        let lon = match body {
            Body::Sun => sun(d).longitude,
            Body::Moon => moon_longitude(d),
            _ => planet_longitude(body, d)?,
        };
        if !lon.is_finite() {
            return Err(EphemerisError::InvalidLongitude { body, value: lon });
        }
        Ok(normalize_degrees(lon))
    }
}

#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Longitude of the ascending node.
    node: f64,
    inclination: f64,
    /// Argument of perihelion.
    perihelion: f64,
    semi_major: f64,
    eccentricity: f64,
    mean_anomaly: f64,
}

struct SunPosition {
    longitude: f64,
    distance: f64,
    mean_anomaly: f64,
    mean_longitude: f64,
}

fn day_number(instant: DateTime<Utc>) -> f64 {
    let seconds =
        instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_millis()) / 1000.0;
    seconds / 86_400.0 + UNIX_EPOCH_DAY
}

fn sun(d: f64) -> SunPosition {
    let w = 282.9404 + 4.70935e-5 * d;
    let e = 0.016709 - 1.151e-9 * d;
    let m = normalize_degrees(356.0470 + 0.985_600_258_5 * d);
    let (v, r) = true_anomaly_and_radius(m, e, 1.0);
    SunPosition {
        longitude: normalize_degrees(v + w),
        distance: r,
        mean_anomaly: m,
        mean_longitude: normalize_degrees(m + w),
    }
}

fn moon_longitude(d: f64) -> f64 {
    let el = Elements {
        node: 125.1228 - 0.052_953_808_3 * d,
        inclination: 5.1454,
        perihelion: 318.0634 + 0.164_357_322_3 * d,
        semi_major: 60.2666,
        eccentricity: 0.054900,
        mean_anomaly: normalize_degrees(115.3654 + 13.064_992_950_9 * d),
    };
    let (x, y) = ecliptic_xy(&el);
    let base = y.atan2(x).to_degrees();

    let s = sun(d);
    let ms = s.mean_anomaly;
    let mm = el.mean_anomaly;
    let lm = el.mean_anomaly + el.perihelion + el.node;
    let dd = lm - s.mean_longitude;
    let f = lm - el.node;

    let perturbation = -1.274 * sin_deg(mm - 2.0 * dd)
        + 0.658 * sin_deg(2.0 * dd)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd);

    normalize_degrees(base + perturbation)
}

fn planet_longitude(body: Body, d: f64) -> Result<f64, EphemerisError> {
    let el = planet_elements(body, d).ok_or(EphemerisError::Unavailable { body })?;
    let (xh, yh) = ecliptic_xy(&el);
    let s = sun(d);
    let xg = xh + s.distance * cos_deg(s.longitude);
    let yg = yh + s.distance * sin_deg(s.longitude);
    Ok(normalize_degrees(yg.atan2(xg).to_degrees()))
}

fn planet_elements(body: Body, d: f64) -> Option<Elements> {
    let el = match body {
        Body::Mercury => Elements {
            node: 48.3313 + 3.24587e-5 * d,
            inclination: 7.0047 + 5.00e-8 * d,
            perihelion: 29.1241 + 1.01444e-5 * d,
            semi_major: 0.387098,
            eccentricity: 0.205635 + 5.59e-10 * d,
            mean_anomaly: 168.6562 + 4.092_334_436_8 * d,
        },
        Body::Venus => Elements {
            node: 76.6799 + 2.46590e-5 * d,
            inclination: 3.3946 + 2.75e-8 * d,
            perihelion: 54.8910 + 1.38374e-5 * d,
            semi_major: 0.723330,
            eccentricity: 0.006773 - 1.302e-9 * d,
            mean_anomaly: 48.0052 + 1.602_130_224_4 * d,
        },
        Body::Mars => Elements {
            node: 49.5574 + 2.11081e-5 * d,
            inclination: 1.8497 - 1.78e-8 * d,
            perihelion: 286.5016 + 2.92961e-5 * d,
            semi_major: 1.523688,
            eccentricity: 0.093405 + 2.516e-9 * d,
            mean_anomaly: 18.6021 + 0.524_020_776_6 * d,
        },
        Body::Jupiter => Elements {
            node: 100.4542 + 2.76854e-5 * d,
            inclination: 1.3030 - 1.557e-7 * d,
            perihelion: 273.8777 + 1.64505e-5 * d,
            semi_major: 5.20256,
            eccentricity: 0.048498 + 4.469e-9 * d,
            mean_anomaly: 19.8950 + 0.083_085_300_1 * d,
        },
        Body::Saturn => Elements {
            node: 113.6634 + 2.38980e-5 * d,
            inclination: 2.4886 - 1.081e-7 * d,
            perihelion: 339.3939 + 2.97661e-5 * d,
            semi_major: 9.55475,
            eccentricity: 0.055546 - 9.499e-9 * d,
            mean_anomaly: 316.9670 + 0.033_444_228_2 * d,
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(Elements {
        mean_anomaly: normalize_degrees(el.mean_anomaly),
        ..el
    })
}

/// Position in the ecliptic plane relative to the orbit's focus.
fn ecliptic_xy(el: &Elements) -> (f64, f64) {
    let (v, r) = true_anomaly_and_radius(el.mean_anomaly, el.eccentricity, el.semi_major);
    let u = v + el.perihelion;
    let cos_i = cos_deg(el.inclination);
    let x = r * (cos_deg(el.node) * cos_deg(u) - sin_deg(el.node) * sin_deg(u) * cos_i);
    let y = r * (sin_deg(el.node) * cos_deg(u) + cos_deg(el.node) * sin_deg(u) * cos_i);
    (x, y)
}

/// Solve Kepler's equation; returns true anomaly in degrees and radius.
fn true_anomaly_and_radius(mean_anomaly: f64, e: f64, a: f64) -> (f64, f64) {
    let m = mean_anomaly.to_radians();
    let mut ecc = m + e * m.sin() * (1.0 + e * m.cos());
    for _ in 0..8 {
        let delta = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-10 {
            break;
        }
    }
    let xv = a * (ecc.cos() - e);
    let yv = a * (1.0 - e * e).sqrt() * ecc.sin();
    (yv.atan2(xv).to_degrees(), xv.hypot(yv))
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}
