//! Spherical math for GLOBEFLIGHT.
//!
//! Raw projections and their blend, cartographic rotation, geodesic
//! interpolation and bearings, easing, and location centroids.
//! Everything here is pure and allocation-free on the per-frame path.

pub use globeflight_core as core;

pub mod centroid;
pub mod easing;
pub mod geodesic;
pub mod projection;
pub mod rotation;

// Re-export key types for convenience.
pub use centroid::{BoundaryCentroids, GeometryProvider, StaticCentroids, WithOverrides};
pub use easing::ease_cubic_in_out;
pub use geodesic::{bearing, distance_km, haversine, interpolate, GreatCircle};
pub use projection::{blend, Blend, BlendedProjection, Equirectangular, Orthographic, Projection, RawProjection};
pub use rotation::SphericalRotation;
