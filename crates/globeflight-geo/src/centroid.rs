//! Location centroids and the geometry provider contract.
//!
//! Boundary data itself is loaded by the host. The engine only ever asks
//! "where is the center of this place?" through [`GeometryProvider`].

use std::collections::HashMap;

use glam::DVec3;

use globeflight_core::{GeoCoordinate, LocationId};

/// Source of location centroids.
pub trait GeometryProvider {
    /// Centroid of `id`, or `None` when no geometry is known for it.
    fn centroid_of(&self, id: LocationId) -> Option<GeoCoordinate>;
}

impl<F> GeometryProvider for F
where
    F: Fn(LocationId) -> Option<GeoCoordinate>,
{
    fn centroid_of(&self, id: LocationId) -> Option<GeoCoordinate> {
        self(id)
    }
}

/// Hand-placed centroids for places whose polygon centroid lands somewhere
/// misleading: the United States pulled toward Alaska and Hawaii, France
/// pulled toward its overseas departments.
pub const CENTROID_OVERRIDES: [(LocationId, GeoCoordinate); 2] = [
    (
        LocationId::UnitedStates,
        GeoCoordinate {
            lon: -98.58,
            lat: 39.83,
        },
    ),
    (
        LocationId::France,
        GeoCoordinate {
            lon: 2.54,
            lat: 46.60,
        },
    ),
];

pub fn centroid_override(id: LocationId) -> Option<GeoCoordinate> {
    CENTROID_OVERRIDES
        .iter()
        .find(|(overridden, _)| *overridden == id)
        .map(|(_, coord)| *coord)
}

/// Built-in approximate centroids for every serviced location.
///
/// Already visually placed, so no override pass is needed on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCentroids;

impl GeometryProvider for StaticCentroids {
    fn centroid_of(&self, id: LocationId) -> Option<GeoCoordinate> {
        let (lon, lat) = match id {
            LocationId::Korea => (127.98, 36.34),
            LocationId::UnitedStates => (-98.58, 39.83),
            LocationId::Japan => (138.25, 36.20),
            LocationId::Australia => (134.49, -25.73),
            LocationId::China => (103.82, 36.56),
            LocationId::Philippines => (122.88, 11.78),
            LocationId::Laos => (102.50, 19.86),
            LocationId::UnitedKingdom => (-2.87, 54.12),
            LocationId::France => (2.54, 46.60),
            LocationId::Italy => (12.57, 42.80),
            LocationId::Switzerland => (8.23, 46.80),
            LocationId::Germany => (10.39, 51.11),
            LocationId::Egypt => (29.86, 26.49),
        };
        Some(GeoCoordinate::new(lon, lat))
    }
}

/// Centroids derived from host-supplied boundary rings.
#[derive(Debug, Clone, Default)]
pub struct BoundaryCentroids {
    rings: HashMap<LocationId, Vec<Vec<GeoCoordinate>>>,
}

impl BoundaryCentroids {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the boundary of `id` with `rings` (outer rings and islands alike).
    pub fn insert(&mut self, id: LocationId, rings: Vec<Vec<GeoCoordinate>>) {
        self.rings.insert(id, rings);
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.rings.contains_key(&id)
    }
}

impl GeometryProvider for BoundaryCentroids {
    fn centroid_of(&self, id: LocationId) -> Option<GeoCoordinate> {
        self.rings.get(&id).and_then(|rings| spherical_centroid(rings))
    }
}

/// Wraps a provider so [`CENTROID_OVERRIDES`] win over computed centroids.
#[derive(Debug, Clone, Default)]
pub struct WithOverrides<P> {
    inner: P,
}

impl<P: GeometryProvider> WithOverrides<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: GeometryProvider> GeometryProvider for WithOverrides<P> {
    fn centroid_of(&self, id: LocationId) -> Option<GeoCoordinate> {
        centroid_override(id).or_else(|| self.inner.centroid_of(id))
    }
}

/// Centroid of closed rings on the sphere, weighting each edge midpoint by
/// the edge's arc length. Returns `None` for empty input or when the
/// weights cancel out (e.g. a ring hugging a great circle).
pub fn spherical_centroid(rings: &[Vec<GeoCoordinate>]) -> Option<GeoCoordinate> {
    let mut sum = DVec3::ZERO;
    let mut vertex_sum = DVec3::ZERO;

    for ring in rings {
        for (i, point) in ring.iter().enumerate() {
            let a = point.to_unit_vector();
            vertex_sum += a;
            let b = ring[(i + 1) % ring.len()].to_unit_vector();
            let arc = a.cross(b).length().atan2(a.dot(b));
            sum += (a + b).normalize_or_zero() * arc;
        }
    }

    // Single points and zero-length rings carry no edge weight.
    let chosen = if sum.length_squared() > 1e-24 {
        sum
    } else {
        vertex_sum
    };
    if chosen.length_squared() <= 1e-24 {
        return None;
    }
    Some(GeoCoordinate::from_unit_vector(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lon: f64, lat: f64, half: f64) -> Vec<GeoCoordinate> {
        vec![
            GeoCoordinate::new(lon - half, lat - half),
            GeoCoordinate::new(lon + half, lat - half),
            GeoCoordinate::new(lon + half, lat + half),
            GeoCoordinate::new(lon - half, lat + half),
        ]
    }

    #[test]
    fn test_static_table_covers_every_location() {
        for id in LocationId::ALL {
            let c = StaticCentroids.centroid_of(id);
            assert!(c.is_some(), "missing centroid for {id}");
        }
    }

    #[test]
    fn test_symmetric_ring_centroid_is_center() {
        let c = spherical_centroid(&[square(10.0, 0.0, 2.0)]).unwrap();
        assert!(c.approx_eq(&GeoCoordinate::new(10.0, 0.0), 1e-6), "{c:?}");
    }

    #[test]
    fn test_ring_across_antimeridian() {
        let c = spherical_centroid(&[square(180.0, -10.0, 1.0)]).unwrap();
        assert!(c.approx_eq(&GeoCoordinate::new(180.0, -10.0), 0.05), "{c:?}");
    }

    #[test]
    fn test_single_point_ring() {
        let p = GeoCoordinate::new(-3.0, 40.0);
        let c = spherical_centroid(&[vec![p]]).unwrap();
        assert!(c.approx_eq(&p, 1e-9));
        assert!(spherical_centroid(&[]).is_none());
    }

    #[test]
    fn test_boundary_provider_and_overrides() {
        let mut boundaries = BoundaryCentroids::new();
        boundaries.insert(LocationId::Japan, vec![square(138.0, 36.0, 1.0)]);
        // Mainland plus a far-off island group skews the raw centroid.
        boundaries.insert(
            LocationId::France,
            vec![square(2.5, 46.5, 3.0), square(-53.0, 4.0, 1.0)],
        );

        let japan = boundaries.centroid_of(LocationId::Japan).unwrap();
        assert!(japan.approx_eq(&GeoCoordinate::new(138.0, 36.0), 0.05));
        assert!(boundaries.centroid_of(LocationId::Egypt).is_none());

        let raw_france = boundaries.centroid_of(LocationId::France).unwrap();
        assert!(raw_france.lon < 0.0, "raw centroid should drift west: {raw_france:?}");

        let with_overrides = WithOverrides::new(boundaries);
        let france = with_overrides.centroid_of(LocationId::France).unwrap();
        assert!(france.approx_eq(&GeoCoordinate::new(2.54, 46.60), 1e-9));
        assert!(with_overrides.centroid_of(LocationId::Egypt).is_none());
        assert!(with_overrides.inner().contains(LocationId::Japan));
    }

    #[test]
    fn test_closure_provider() {
        let only_korea = |id: LocationId| {
            (id == LocationId::Korea).then(|| GeoCoordinate::new(127.0, 37.5))
        };
        assert!(only_korea.centroid_of(LocationId::Korea).is_some());
        assert!(only_korea.centroid_of(LocationId::Japan).is_none());
    }
}
