//! Ray-casting containment tests for region boundaries.
//!
//! Rings use `GeoJSON` position order (`x = lng`, `y = lat`). A point on a
//! ring edge may be classified either way.

use area_map_region_models::{Coordinate, RegionGeometry};
use geo::{LineString, Polygon};

/// Which rings of a polygon take part in containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainmentRule {
    /// Only the exterior ring is tested. Points inside holes count as
    /// inside the polygon.
    #[default]
    OuterRing,
    /// The point must be inside the exterior ring and outside every hole.
    ExcludeHoles,
}

/// Ray-casting parity test against a single ring.
///
/// Casts a ray along the point's longitude and toggles on every edge whose
/// longitude span straddles the point with a crossing latitude above it.
/// The straddle test excludes edges with equal longitudes, so the
/// interpolation never divides by zero. Rings need not be explicitly
/// closed; the last vertex is always joined back to the first.
#[must_use]
pub fn point_in_ring(point: Coordinate, ring: &LineString<f64>) -> bool {
    let coords = &ring.0;
    let Some(mut prev) = coords.last() else {
        return false;
    };

    let mut inside = false;
    for current in coords {
        if (current.x > point.lng) != (prev.x > point.lng) {
            let crossing =
                (prev.y - current.y) * (point.lng - current.x) / (prev.x - current.x) + current.y;
            if point.lat < crossing {
                inside = !inside;
            }
        }
        prev = current;
    }

    inside
}

fn point_in_polygon(point: Coordinate, polygon: &Polygon<f64>, rule: ContainmentRule) -> bool {
    if !point_in_ring(point, polygon.exterior()) {
        return false;
    }

    match rule {
        ContainmentRule::OuterRing => true,
        ContainmentRule::ExcludeHoles => !polygon
            .interiors()
            .iter()
            .any(|hole| point_in_ring(point, hole)),
    }
}

/// Tests whether `geometry` contains `point` using the exterior rings only.
///
/// [`RegionGeometry::Unsupported`] never contains anything.
#[must_use]
pub fn point_in_geometry(point: Coordinate, geometry: &RegionGeometry) -> bool {
    point_in_geometry_with(point, geometry, ContainmentRule::OuterRing)
}

/// Tests whether `geometry` contains `point` under the given rule.
#[must_use]
pub fn point_in_geometry_with(
    point: Coordinate,
    geometry: &RegionGeometry,
    rule: ContainmentRule,
) -> bool {
    match geometry {
        RegionGeometry::Polygon(polygon) => point_in_polygon(point, polygon, rule),
        RegionGeometry::MultiPolygon(multi) => multi
            .0
            .iter()
            .any(|polygon| point_in_polygon(point, polygon, rule)),
        RegionGeometry::Unsupported => false,
    }
}
