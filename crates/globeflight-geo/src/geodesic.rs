//! Great-circle interpolation, bearings and distances on the unit sphere.

use std::f64::consts::PI;

use glam::DVec3;

use globeflight_core::constants::{COORD_TOLERANCE_DEG, EARTH_RADIUS_KM};
use globeflight_core::GeoCoordinate;

/// Shortest path between two points on the sphere, parameterized by
/// normalized progress.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircle {
    start: GeoCoordinate,
    end: GeoCoordinate,
    origin: DVec3,
    /// Unit vector orthogonal to `origin` in the plane of the path.
    toward: DVec3,
    /// Central angle between the endpoints (radians).
    angle: f64,
}

/// Build the great-circle path from `start` to `end`.
pub fn interpolate(start: GeoCoordinate, end: GeoCoordinate) -> GreatCircle {
    let origin = start.to_unit_vector();
    let target = end.to_unit_vector();
    let angle = central_angle(origin, target);

    let toward = if angle <= COORD_TOLERANCE_DEG.to_radians() {
        DVec3::ZERO
    } else if PI - angle <= COORD_TOLERANCE_DEG.to_radians() {
        // Antipodal: every great circle through both points is shortest. Pick one.
        origin.any_orthonormal_vector()
    } else {
        (target - origin * origin.dot(target)).normalize()
    };

    GreatCircle {
        start,
        end,
        origin,
        toward,
        angle,
    }
}

impl GreatCircle {
    /// Point at fraction `t` of the way along the path.
    pub fn at(&self, t: f64) -> GeoCoordinate {
        if self.is_degenerate() {
            return self.start;
        }
        let theta = self.angle * t;
        GeoCoordinate::from_unit_vector(self.origin * theta.cos() + self.toward * theta.sin())
    }

    /// Start and end are the same point.
    pub fn is_degenerate(&self) -> bool {
        self.toward == DVec3::ZERO
    }

    pub fn start(&self) -> GeoCoordinate {
        self.start
    }

    pub fn end(&self) -> GeoCoordinate {
        self.end
    }

    /// Path length on the mean Earth sphere (km).
    pub fn length_km(&self) -> f64 {
        self.angle * EARTH_RADIUS_KM
    }
}

/// Initial compass bearing from `start` toward `end`, degrees clockwise from
/// north in [0, 360). Coincident points yield 0.0.
pub fn bearing(start: GeoCoordinate, end: GeoCoordinate) -> f64 {
    let (lambda1, phi1) = start.to_radians();
    let (lambda2, phi2) = end.to_radians();
    let delta_lambda = lambda2 - lambda1;

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    if degrees.is_finite() && degrees < 360.0 {
        degrees
    } else {
        0.0
    }
}

/// Central angle between two coordinates (radians), haversine formula.
pub fn haversine(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let (lambda1, phi1) = a.to_radians();
    let (lambda2, phi2) = b.to_radians();
    let h = ((phi2 - phi1) / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * ((lambda2 - lambda1) / 2.0).sin().powi(2);
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Great-circle distance on the mean Earth sphere (km).
pub fn distance_km(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    haversine(a, b) * EARTH_RADIUS_KM
}

fn central_angle(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}
