//! Great-circle distance between airports.
//!
//! Edge weights in the route graph are haversine distances on a sphere with
//! the mean Earth radius. The arithmetic follows the usual formulation
//! (`degrees * PI / 180` for the radian conversion, `atan2` for the central
//! angle) so results stay bit-for-bit comparable with published reference
//! values.

use std::f64::consts::PI;

use crate::airport::Airport;
use crate::error::{Error, Result};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Haversine distance to another point in kilometres.
    ///
    /// Returns NaN when either point carries non-numeric coordinates; use
    /// [`distance_km`] for a checked variant.
    pub fn great_circle_km(&self, other: &Self) -> f64 {
        let phi1 = to_radians(self.latitude);
        let phi2 = to_radians(other.latitude);
        let delta_phi = to_radians(other.latitude - self.latitude);
        let delta_lambda = to_radians(other.longitude - self.longitude);

        let a = (delta_phi / 2.0).sin() * (delta_phi / 2.0).sin()
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin() * (delta_lambda / 2.0).sin();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Compute the great-circle distance between two airports in kilometres.
///
/// Fails with [`Error::InvalidInput`] when either airport is empty (the
/// source is checked first) and with [`Error::ComputationError`] when the
/// coordinates are not numeric.
pub fn distance_km(source: &Airport, destination: &Airport) -> Result<f64> {
    if source.is_empty() {
        return Err(Error::invalid_input("source airport not provided"));
    }

    if destination.is_empty() {
        return Err(Error::invalid_input("destination airport not provided"));
    }

    let distance = source.position().great_circle_km(&destination.position());
    if distance.is_nan() {
        return Err(Error::ComputationError);
    }

    // Guards against -0.0 for identical points.
    Ok(distance.abs())
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tallinn() -> Airport {
        Airport::new("TLL", "Tallinn Airport", 58.99079895019531, 22.830699920654297)
    }

    fn dublin() -> Airport {
        Airport::new("DUB", "Dublin Airport", 53.421299, -6.27007)
    }

    #[test]
    fn matches_reference_distance() {
        let distance = distance_km(&tallinn(), &dublin()).expect("valid airports");
        assert!(
            (distance - 1885.5213994312614).abs() < 1e-9,
            "unexpected distance {distance}"
        );
    }

    #[test]
    fn empty_source_is_rejected_first() {
        let empty = Airport::new("", "", 0.0, 0.0);
        let err = distance_km(&empty, &empty).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(err.to_string(), "source airport not provided");
    }

    #[test]
    fn empty_destination_is_rejected() {
        let empty = Airport::new("  ", "", 0.0, 0.0);
        let err = distance_km(&tallinn(), &empty).unwrap_err();
        assert_eq!(err.to_string(), "destination airport not provided");
    }

    #[test]
    fn non_numeric_coordinates_fail() {
        let broken = Airport::new("BRK", "Broken", f64::NAN, f64::NAN);
        let err = distance_km(&broken, &dublin()).unwrap_err();
        assert!(matches!(err, Error::ComputationError));
        assert_eq!(err.to_string(), "invalid distance calculation");
    }

    #[test]
    fn identical_points_are_zero() {
        let distance = distance_km(&dublin(), &dublin()).unwrap();
        assert_eq!(distance, 0.0);
        assert!(distance.is_sign_positive());
    }
}
