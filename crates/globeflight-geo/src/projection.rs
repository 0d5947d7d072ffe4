//! Raw projections, their blend, and the full projection pipeline.
//!
//! A raw projection maps (lambda, phi) in radians to a unit-scale planar
//! point with y pointing north. [`Projection`] wraps one with rotation,
//! scale and translation and flips y so the result is in screen pixels.

use glam::DVec2;

use globeflight_core::state::ProjectionParameters;
use globeflight_core::GeoCoordinate;

use crate::rotation::SphericalRotation;

/// A stateless spherical → planar mapping.
pub trait RawProjection {
    fn project(&self, lambda: f64, phi: f64) -> DVec2;
}

impl<F> RawProjection for F
where
    F: Fn(f64, f64) -> DVec2,
{
    fn project(&self, lambda: f64, phi: f64) -> DVec2 {
        self(lambda, phi)
    }
}

/// Plate carrée: longitude and latitude used directly as x and y.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equirectangular;

impl RawProjection for Equirectangular {
    fn project(&self, lambda: f64, phi: f64) -> DVec2 {
        DVec2::new(lambda, phi)
    }
}

/// The globe as seen from infinitely far away, centered on (0°, 0°).
/// Points on the far hemisphere fold onto the visible disc; hiding them is
/// left to the clip angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orthographic;

impl RawProjection for Orthographic {
    fn project(&self, lambda: f64, phi: f64) -> DVec2 {
        DVec2::new(phi.cos() * lambda.sin(), phi.sin())
    }
}

/// Componentwise linear mix of two raw projections.
#[derive(Debug, Clone, Copy)]
pub struct Blend<A, B> {
    a: A,
    b: B,
    t: f64,
}

/// Mix `a` and `b` by `t`: 0.0 is pure `a`, 1.0 is pure `b`.
pub fn blend<A: RawProjection, B: RawProjection>(a: A, b: B, t: f64) -> Blend<A, B> {
    Blend { a, b, t }
}

impl<A: RawProjection, B: RawProjection> RawProjection for Blend<A, B> {
    fn project(&self, lambda: f64, phi: f64) -> DVec2 {
        let pa = self.a.project(lambda, phi);
        let pb = self.b.project(lambda, phi);
        pa.lerp(pb, self.t)
    }
}

/// Rotation, raw projection, scale and translate composed into one mapping
/// from geographic coordinates to screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Projection<R> {
    raw: R,
    rotation: SphericalRotation,
    scale: f64,
    translate: DVec2,
    cos_clip: f64,
}

/// The flat ↔ globe projection the engine animates.
pub type BlendedProjection = Projection<Blend<Equirectangular, Orthographic>>;

impl<R: RawProjection> Projection<R> {
    pub fn new(raw: R, params: &ProjectionParameters) -> Self {
        Self {
            raw,
            rotation: SphericalRotation::new(&params.rotation),
            scale: params.scale,
            translate: params.translate,
            cos_clip: params.clip_angle.to_radians().cos(),
        }
    }

    /// Screen position of `coord` in pixels (y grows downward).
    pub fn project(&self, coord: GeoCoordinate) -> DVec2 {
        let (lambda, phi) = coord.to_radians();
        let (lambda, phi) = self.rotation.rotate(lambda, phi);
        let p = self.raw.project(lambda, phi);
        self.translate + DVec2::new(p.x * self.scale, -p.y * self.scale)
    }

    /// Whether `coord` falls inside the clip angle around the view center.
    pub fn is_visible(&self, coord: GeoCoordinate) -> bool {
        let (lambda, phi) = coord.to_radians();
        let (lambda, phi) = self.rotation.rotate(lambda, phi);
        lambda.cos() * phi.cos() >= self.cos_clip
    }
}

impl BlendedProjection {
    /// Rebuild the projection a frame's parameters describe.
    pub fn from_parameters(params: &ProjectionParameters) -> Self {
        Projection::new(blend(Equirectangular, Orthographic, params.morph), params)
    }
}
