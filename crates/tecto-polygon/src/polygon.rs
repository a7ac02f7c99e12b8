// SPDX-License-Identifier: Apache-2.0
//! Assembled spherical polygons (§4.7).

use tecto_geom::{spherical_excess_area, SurfacePoint};
use tecto_ids::PlateId;

use crate::tolerance::SLIVER_AREA_THRESHOLD;

/// A plate's polygon: an outer ring plus zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Plate this polygon belongs to.
    pub plate_id: PlateId,
    /// Outer boundary ring, closed (`outer_ring.first() == outer_ring.last()`).
    pub outer_ring: Vec<SurfacePoint>,
    /// Hole rings, ordered by lexicographically-least vertex.
    pub holes: Vec<Vec<SurfacePoint>>,
    /// Spherical (Girard excess) area of the outer ring, minus hole areas.
    pub area: f64,
    /// Whether `area` is below [`SLIVER_AREA_THRESHOLD`].
    pub is_sliver: bool,
}

impl Polygon {
    /// Builds a polygon, computing its area and sliver flag from `outer_ring`
    /// and `holes`.
    #[must_use]
    pub fn new(plate_id: PlateId, outer_ring: Vec<SurfacePoint>, mut holes: Vec<Vec<SurfacePoint>>) -> Self {
        holes.sort_by_key(|hole| hole.iter().map(|p| p.lexicographic_key()).min());
        let outer_area = spherical_excess_area(&outer_ring);
        let hole_area: f64 = holes.iter().map(|hole| spherical_excess_area(hole)).sum();
        let area = outer_area - hole_area;
        let is_sliver = area.abs() < SLIVER_AREA_THRESHOLD;
        Self {
            plate_id,
            outer_ring,
            holes,
            area,
            is_sliver,
        }
    }
}

/// A complete set of polygons covering the non-retired plates of one
/// topology state.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSet {
    /// Polygons, one per attributed plate, in ascending [`PlateId`] order.
    pub polygons: Vec<Polygon>,
}

impl PolygonSet {
    /// Total signed area across every outer ring (holes excluded), which
    /// should equal `4*pi` steradians within a configured tolerance for a
    /// sphere-covering topology (§4.7) — checked as a property test, not
    /// asserted here.
    #[must_use]
    pub fn total_outer_area(&self) -> f64 {
        self.polygons
            .iter()
            .map(|polygon| spherical_excess_area(&polygon.outer_ring))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliver_flag_is_set_below_threshold() {
        let p = Polygon::new(PlateId::from_u128(1), vec![], vec![]);
        assert!(p.is_sliver);
        assert_eq!(p.area, 0.0);
    }
}
