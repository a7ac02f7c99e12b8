// SPDX-License-Identifier: Apache-2.0
//! Darts: directed half-edges of the combinatorial map (§4.7).

use tecto_ids::{BoundaryId, PlateId};

/// Index into the parallel dart arrays of a [`crate::cmap::CombinatorialMap`].
pub type DartId = usize;

/// Which endpoint of a boundary's geometry a dart starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source vertex is `geometry.first()`.
    Forward,
    /// Source vertex is `geometry.last()`.
    Backward,
}

/// One directed half-edge.
///
/// Every non-retired boundary contributes exactly two darts, one per
/// [`Direction`]; they are each other's image under *α*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dart {
    /// Boundary this dart traverses.
    pub boundary_id: BoundaryId,
    /// Direction of traversal along the boundary's stored geometry.
    pub direction: Direction,
}

impl Dart {
    /// The plate this dart considers to be on its left, per the boundary's
    /// `left`/`right` fields: traversing forward keeps `left` on the left,
    /// traversing backward flips which side is which.
    #[must_use]
    pub fn left_plate(self, boundary_left: PlateId, boundary_right: PlateId) -> PlateId {
        match self.direction {
            Direction::Forward => boundary_left,
            Direction::Backward => boundary_right,
        }
    }
}
