//! Geodesic locations on a spherical Earth.
//!
//! `Location` is immutable: every transformation returns a new value.
//! Distance uses the haversine formula, stepping uses the spherical
//! direct formula along the initial bearing (movable-type formulary).

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;

/// A point on the Earth's surface in signed decimal degrees.
/// Negative latitude is south, negative longitude is west.
/// E.g. Tokyo is (35.69, 139.69), Rio de Janeiro is (-22.91, -43.17).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon: normalize_lon(lon),
        }
    }

    /// Great-circle distance to another location in kilometers.
    /// Symmetric; zero (up to floating tolerance) at identity.
    pub fn distance_km(&self, other: &Location) -> f64 {
        let phi_1 = self.lat.to_radians();
        let phi_2 = other.lat.to_radians();
        let delta_phi = (other.lat - self.lat).to_radians();
        let delta_lambda = (other.lon - self.lon).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Initial bearing toward another location, in radians.
    fn bearing_towards(&self, other: &Location) -> f64 {
        let phi_1 = self.lat.to_radians();
        let phi_2 = other.lat.to_radians();
        let delta_lambda = (other.lon - self.lon).to_radians();

        let y = delta_lambda.sin() * phi_2.cos();
        let x = phi_1.cos() * phi_2.sin() - phi_1.sin() * phi_2.cos() * delta_lambda.cos();
        y.atan2(x)
    }

    /// New location `distance_km` along the initial bearing toward
    /// `other`. Does not clamp: stepping past `other` is well-defined
    /// geometry, and callers that care must clamp the step themselves.
    pub fn move_towards(&self, other: &Location, distance_km: f64) -> Location {
        let bearing = self.bearing_towards(other);

        let phi_1 = self.lat.to_radians();
        let lambda_1 = self.lon.to_radians();
        let angular = distance_km / EARTH_RADIUS_KM;

        let phi_2 =
            (phi_1.sin() * angular.cos() + phi_1.cos() * angular.sin() * bearing.cos()).asin();
        let lambda_2 = lambda_1
            + (bearing.sin() * angular.sin() * phi_1.cos())
                .atan2(angular.cos() - phi_1.sin() * phi_2.sin());

        Location {
            lat: phi_2.to_degrees(),
            lon: normalize_lon(lambda_2.to_degrees()),
        }
    }
}

/// Wrap a longitude into (-180, 180].
fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}
