use helix_core::blueprint::blueprint_from_longitudes;
use helix_core::model::{BirthMoment, Blueprint, Body, PlanetaryLongitudes};

/// Blueprint with every body at `degrees`.
pub(crate) fn blueprint_at(degrees: f64) -> Blueprint {
    blueprint_with(degrees, &[])
}

/// Blueprint with every body at `base` except the listed overrides.
pub(crate) fn blueprint_with(base: f64, overrides: &[(Body, f64)]) -> Blueprint {
    let longitudes: PlanetaryLongitudes = Body::ALL
        .into_iter()
        .map(|b| {
            let lon = overrides
                .iter()
                .find(|(o, _)| *o == b)
                .map(|(_, d)| *d)
                .unwrap_or(base);
            (b, lon)
        })
        .collect();
    let birth = BirthMoment::parse("2000-01-01", None).unwrap();
    blueprint_from_longitudes(birth, longitudes).unwrap()
}
