//! Cartographic three-axis rotation of the sphere.
//!
//! A rotation `(lambda, phi, gamma)` first shifts every longitude by `lambda`,
//! then tips the sphere by `phi` about the east-west axis through the origin
//! meridian and rolls it by `gamma` about the view axis. With
//! `Rotation::centering(c)` the point `c` lands on (0°, 0°), the view center
//! of every projection in this crate.

use std::f64::consts::{PI, TAU};

use globeflight_core::types::Rotation;

/// Precomputed trigonometry for a [`Rotation`].
#[derive(Debug, Clone, Copy)]
pub struct SphericalRotation {
    delta_lambda: f64,
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl SphericalRotation {
    pub fn new(rotation: &Rotation) -> Self {
        let delta_phi = rotation.phi.to_radians();
        let delta_gamma = rotation.gamma.to_radians();
        Self {
            delta_lambda: rotation.lambda.to_radians().rem_euclid(TAU),
            cos_delta_phi: delta_phi.cos(),
            sin_delta_phi: delta_phi.sin(),
            cos_delta_gamma: delta_gamma.cos(),
            sin_delta_gamma: delta_gamma.sin(),
        }
    }

    /// Rotate (lambda, phi) in radians.
    pub fn rotate(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_pi(lambda + self.delta_lambda);

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;

        (
            (y * self.cos_delta_gamma - k * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi - z * self.sin_delta_phi),
            (k * self.cos_delta_gamma + y * self.sin_delta_gamma)
                .clamp(-1.0, 1.0)
                .asin(),
        )
    }
}

/// Wrap an angle in radians into [-pi, pi].
fn wrap_pi(angle: f64) -> f64 {
    if angle > PI {
        angle - TAU
    } else if angle < -PI {
        angle + TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globeflight_core::GeoCoordinate;

    fn rotate_deg(rotation: &SphericalRotation, coord: GeoCoordinate) -> GeoCoordinate {
        let (lambda, phi) = coord.to_radians();
        let (l, p) = rotation.rotate(lambda, phi);
        GeoCoordinate::from_radians(l, p)
    }

    #[test]
    fn test_identity_leaves_points_alone() {
        let rot = SphericalRotation::new(&Rotation::IDENTITY);
        let c = GeoCoordinate::new(-73.9, 40.7);
        let r = rotate_deg(&rot, c);
        assert!(r.approx_eq(&c, 1e-9), "{r:?}");
    }

    #[test]
    fn test_centering_moves_point_to_origin() {
        for c in [
            GeoCoordinate::new(127.0, 37.5),
            GeoCoordinate::new(-98.6, 39.8),
            GeoCoordinate::new(134.5, -25.7),
            GeoCoordinate::new(179.0, -10.0),
        ] {
            let rot = SphericalRotation::new(&Rotation::centering(c));
            let r = rotate_deg(&rot, c);
            assert!(r.approx_eq(&GeoCoordinate::new(0.0, 0.0), 1e-9), "{c:?} -> {r:?}");
        }
    }

    #[test]
    fn test_pure_longitude_shift() {
        let rot = SphericalRotation::new(&Rotation::new(30.0, 0.0, 0.0));
        let r = rotate_deg(&rot, GeoCoordinate::new(170.0, 5.0));
        assert!(r.approx_eq(&GeoCoordinate::new(-160.0, 5.0), 1e-9), "{r:?}");
    }

    #[test]
    fn test_preserves_angular_distance() {
        let rot = SphericalRotation::new(&Rotation::new(40.0, -20.0, 5.0));
        let a = GeoCoordinate::new(10.0, 10.0);
        let b = GeoCoordinate::new(-50.0, 60.0);
        let before = a.to_unit_vector().dot(b.to_unit_vector());
        let after = rotate_deg(&rot, a)
            .to_unit_vector()
            .dot(rotate_deg(&rot, b).to_unit_vector());
        assert!((before - after).abs() < 1e-12);
    }
}
