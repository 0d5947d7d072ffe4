//! Fundamental geographic and timing types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A point on the globe in degrees.
///
/// Longitude is kept in (-180, 180] and latitude in [-90, 90] by
/// [`GeoCoordinate::new`]; everything downstream assumes that range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: normalize_longitude(lon),
            lat: lat.clamp(-90.0, 90.0),
        }
    }

    /// Build from (lambda, phi) in radians.
    pub fn from_radians(lambda: f64, phi: f64) -> Self {
        Self::new(lambda.to_degrees(), phi.to_degrees())
    }

    /// (lambda, phi) in radians.
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }

    /// Position on the unit sphere. x points at (0°, 0°), z at the north pole.
    pub fn to_unit_vector(&self) -> DVec3 {
        let (lambda, phi) = self.to_radians();
        DVec3::new(phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin())
    }

    /// Inverse of [`GeoCoordinate::to_unit_vector`]. The vector need not be normalized.
    pub fn from_unit_vector(v: DVec3) -> Self {
        let v = v.normalize_or_zero();
        let phi = v.z.clamp(-1.0, 1.0).asin();
        let lambda = v.y.atan2(v.x);
        Self::from_radians(lambda, phi)
    }

    /// Angular closeness test on the sphere. Immune to the antimeridian wrap
    /// and to longitude being meaningless at the poles.
    pub fn approx_eq(&self, other: &GeoCoordinate, tolerance_deg: f64) -> bool {
        let a = self.to_unit_vector();
        let b = other.to_unit_vector();
        a.cross(b).length().atan2(a.dot(b)).to_degrees() <= tolerance_deg
    }
}

/// Wrap a longitude in degrees into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Three-axis rotation (lambda, phi, gamma) in degrees, applied to the globe
/// before projecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub lambda: f64,
    pub phi: f64,
    pub gamma: f64,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        lambda: 0.0,
        phi: 0.0,
        gamma: 0.0,
    };

    pub fn new(lambda: f64, phi: f64, gamma: f64) -> Self {
        Self { lambda, phi, gamma }
    }

    /// Rotation that brings `coord` to the center of the view.
    pub fn centering(coord: GeoCoordinate) -> Self {
        Self::new(-coord.lon, -coord.lat, 0.0)
    }

    /// Componentwise linear interpolation.
    pub fn lerp(&self, other: &Rotation, t: f64) -> Rotation {
        Rotation {
            lambda: lerp(self.lambda, other.lambda, t),
            phi: lerp(self.phi, other.phi, t),
            gamma: lerp(self.gamma, other.gamma, t),
        }
    }
}

/// Pixel dimensions of the host's drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_VIEWPORT_WIDTH,
            height: crate::constants::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen center in pixels.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Frame counter and accumulated host time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Frame number (increments by 1 each tick).
    pub frame: u64,
    /// Elapsed host time in seconds.
    pub elapsed_secs: f64,
}

impl FrameTime {
    pub fn advance(&mut self, dt_secs: f64) {
        self.frame += 1;
        self.elapsed_secs += dt_secs;
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
