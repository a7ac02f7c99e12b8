// SPDX-License-Identifier: Apache-2.0
//! The materialized read-model (§3.3).

use std::collections::BTreeMap;

use tecto_codec::BoundaryKind;
use tecto_geom::{Polyline3, SurfacePoint};
use tecto_ids::{BoundaryId, JunctionId, PlateId, TruthStreamIdentity};

/// A tectonic plate as of some materialization cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    /// Identifier of this plate.
    pub plate_id: PlateId,
    /// Whether the plate has been retired.
    pub retired: bool,
    /// Human-readable retirement reason, set only when `retired`.
    pub retirement_reason: Option<String>,
}

impl Plate {
    fn new(plate_id: PlateId) -> Self {
        Self {
            plate_id,
            retired: false,
            retirement_reason: None,
        }
    }
}

/// A boundary separating two plates.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Identifier of this boundary.
    pub boundary_id: BoundaryId,
    /// Plate on the "left" side, per the winding of `geometry`.
    pub left: PlateId,
    /// Plate on the "right" side, per the winding of `geometry`.
    pub right: PlateId,
    /// Tectonic relationship this boundary represents.
    pub kind: BoundaryKind,
    /// Boundary trace on the unit sphere.
    pub geometry: Polyline3,
    /// Whether the boundary has been retired.
    pub retired: bool,
    /// Human-readable retirement reason, set only when `retired`.
    pub retirement_reason: Option<String>,
}

/// A junction where two or more boundaries meet.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    /// Identifier of this junction.
    pub junction_id: JunctionId,
    /// Boundaries meeting at this junction, in emission order. Equality
    /// between two junctions' boundary sets is set-based, not order-based.
    pub boundary_ids: Vec<BoundaryId>,
    /// Junction location on the unit sphere.
    pub location: SurfacePoint,
    /// Whether the junction has been retired.
    pub retired: bool,
    /// Human-readable retirement reason, set only when `retired`.
    pub retirement_reason: Option<String>,
}

impl Junction {
    fn references(&self, boundary_id: BoundaryId) -> bool {
        self.boundary_ids.contains(&boundary_id)
    }
}

/// One non-fatal finding surfaced by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Short machine-stable category for this finding.
    pub kind: &'static str,
    /// Human-readable description, including the offending entity's id.
    pub detail: String,
}

/// The materialized topology state for one stream at one cutoff.
///
/// Maps have value semantics: two states are equal iff their keysets are
/// equal and every corresponding value is equal. Once produced, a state is
/// never mutated — folding further events always starts a new state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateTopologyState {
    /// Identity of the stream this state was materialized from.
    pub identity: TruthStreamIdentity,
    /// Plates keyed by id, iterated in ascending-id order.
    pub plates: BTreeMap<PlateId, Plate>,
    /// Boundaries keyed by id, iterated in ascending-id order.
    pub boundaries: BTreeMap<BoundaryId, Boundary>,
    /// Junctions keyed by id, iterated in ascending-id order.
    pub junctions: BTreeMap<JunctionId, Junction>,
    /// Sequence of the last event folded into this state, or `-1` if empty.
    pub last_event_sequence: i64,
    /// Diagnostics accumulated by [`crate::validate`]; empty immediately
    /// after a successful fold (fold itself fails fast on invariant
    /// violations rather than accumulating them).
    pub violations: Vec<Diagnostic>,
}

impl PlateTopologyState {
    pub(crate) fn empty(identity: TruthStreamIdentity) -> Self {
        Self {
            identity,
            plates: BTreeMap::new(),
            boundaries: BTreeMap::new(),
            junctions: BTreeMap::new(),
            last_event_sequence: -1,
            violations: Vec::new(),
        }
    }

    pub(crate) fn insert_plate(&mut self, plate_id: PlateId) {
        self.plates.insert(plate_id, Plate::new(plate_id));
    }

    pub(crate) fn junctions_referencing(&self, boundary_id: BoundaryId) -> Vec<JunctionId> {
        self.junctions
            .values()
            .filter(|j| !j.retired && j.references(boundary_id))
            .map(|j| j.junction_id)
            .collect()
    }
}

pub(crate) fn boundary_from_event(
    boundary_id: BoundaryId,
    left: PlateId,
    right: PlateId,
    kind: BoundaryKind,
    geometry: Polyline3,
) -> Boundary {
    Boundary {
        boundary_id,
        left,
        right,
        kind,
        geometry,
        retired: false,
        retirement_reason: None,
    }
}

pub(crate) fn junction_from_event(
    junction_id: JunctionId,
    boundary_ids: Vec<BoundaryId>,
    location: SurfacePoint,
) -> Junction {
    Junction {
        junction_id,
        boundary_ids,
        location,
        retired: false,
        retirement_reason: None,
    }
}
