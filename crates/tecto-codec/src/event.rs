// SPDX-License-Identifier: Apache-2.0
//! Event kind definitions (§3.4).

use tecto_geom::{Polyline3, SurfacePoint};
use tecto_ids::{BoundaryId, JunctionId, PlateId};

/// The tectonic relationship a boundary represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Plates move apart (e.g. a mid-ocean ridge).
    Divergent,
    /// Plates move toward each other (e.g. a subduction zone).
    Convergent,
    /// Plates slide laterally past each other (e.g. a strike-slip fault).
    Transform,
}

impl BoundaryKind {
    /// Stable numeric tag used in canonical encoding and the wire format.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Divergent => 0,
            Self::Convergent => 1,
            Self::Transform => 2,
        }
    }

    /// Reconstructs a `BoundaryKind` from its wire tag.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Divergent),
            1 => Some(Self::Convergent),
            2 => Some(Self::Transform),
            _ => None,
        }
    }
}

/// One entry in a truth stream's event log (payload only; framing fields —
/// `sequence`, `tick`, `previous_hash`, `hash` — live in `tecto-eventlog`).
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyEvent {
    /// A new plate comes into existence.
    PlateCreated {
        /// Identifier of the new plate.
        plate_id: PlateId,
    },
    /// An existing plate is retired.
    PlateRetired {
        /// Identifier of the plate being retired.
        plate_id: PlateId,
        /// Human-readable retirement reason.
        reason: String,
    },
    /// A new boundary comes into existence between two plates.
    BoundaryCreated {
        /// Identifier of the new boundary.
        boundary_id: BoundaryId,
        /// Plate on the "left" side, per the winding of `geometry`.
        left: PlateId,
        /// Plate on the "right" side, per the winding of `geometry`.
        right: PlateId,
        /// Tectonic relationship this boundary represents.
        kind: BoundaryKind,
        /// Boundary trace on the unit sphere.
        geometry: Polyline3,
    },
    /// A boundary's kind changes (e.g. transform becoming convergent).
    BoundaryTypeChanged {
        /// Identifier of the affected boundary.
        boundary_id: BoundaryId,
        /// Kind before the change.
        old_kind: BoundaryKind,
        /// Kind after the change.
        new_kind: BoundaryKind,
    },
    /// A boundary's geometry is replaced.
    BoundaryGeometryUpdated {
        /// Identifier of the affected boundary.
        boundary_id: BoundaryId,
        /// Replacement boundary trace.
        new_geometry: Polyline3,
    },
    /// An existing boundary is retired.
    BoundaryRetired {
        /// Identifier of the boundary being retired.
        boundary_id: BoundaryId,
        /// Human-readable retirement reason.
        reason: String,
    },
    /// A new junction comes into existence.
    JunctionCreated {
        /// Identifier of the new junction.
        junction_id: JunctionId,
        /// Boundaries meeting at this junction, in emission order.
        boundary_ids: Vec<BoundaryId>,
        /// Junction location on the unit sphere.
        location: SurfacePoint,
    },
    /// A junction's boundary set and/or location is replaced.
    JunctionUpdated {
        /// Identifier of the affected junction.
        junction_id: JunctionId,
        /// Replacement boundary set, in emission order.
        new_boundary_ids: Vec<BoundaryId>,
        /// Replacement location, if the location itself changed.
        new_location: Option<SurfacePoint>,
    },
    /// An existing junction is retired.
    JunctionRetired {
        /// Identifier of the junction being retired.
        junction_id: JunctionId,
        /// Human-readable retirement reason.
        reason: String,
    },
}

/// Stable numeric tag for each event kind, used in canonical encoding and
/// the wire record header's `event_kind` field (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EventKindTag {
    /// Tag for [`TopologyEvent::PlateCreated`].
    PlateCreated = 1,
    /// Tag for [`TopologyEvent::PlateRetired`].
    PlateRetired = 2,
    /// Tag for [`TopologyEvent::BoundaryCreated`].
    BoundaryCreated = 3,
    /// Tag for [`TopologyEvent::BoundaryTypeChanged`].
    BoundaryTypeChanged = 4,
    /// Tag for [`TopologyEvent::BoundaryGeometryUpdated`].
    BoundaryGeometryUpdated = 5,
    /// Tag for [`TopologyEvent::BoundaryRetired`].
    BoundaryRetired = 6,
    /// Tag for [`TopologyEvent::JunctionCreated`].
    JunctionCreated = 7,
    /// Tag for [`TopologyEvent::JunctionUpdated`].
    JunctionUpdated = 8,
    /// Tag for [`TopologyEvent::JunctionRetired`].
    JunctionRetired = 9,
}

impl EventKindTag {
    /// Reconstructs a tag from its wire value.
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::PlateCreated),
            2 => Some(Self::PlateRetired),
            3 => Some(Self::BoundaryCreated),
            4 => Some(Self::BoundaryTypeChanged),
            5 => Some(Self::BoundaryGeometryUpdated),
            6 => Some(Self::BoundaryRetired),
            7 => Some(Self::JunctionCreated),
            8 => Some(Self::JunctionUpdated),
            9 => Some(Self::JunctionRetired),
            _ => None,
        }
    }
}

impl TopologyEvent {
    /// Returns this event's wire/canonical-encoding kind tag.
    #[must_use]
    pub fn kind_tag(&self) -> EventKindTag {
        match self {
            Self::PlateCreated { .. } => EventKindTag::PlateCreated,
            Self::PlateRetired { .. } => EventKindTag::PlateRetired,
            Self::BoundaryCreated { .. } => EventKindTag::BoundaryCreated,
            Self::BoundaryTypeChanged { .. } => EventKindTag::BoundaryTypeChanged,
            Self::BoundaryGeometryUpdated { .. } => EventKindTag::BoundaryGeometryUpdated,
            Self::BoundaryRetired { .. } => EventKindTag::BoundaryRetired,
            Self::JunctionCreated { .. } => EventKindTag::JunctionCreated,
            Self::JunctionUpdated { .. } => EventKindTag::JunctionUpdated,
            Self::JunctionRetired { .. } => EventKindTag::JunctionRetired,
        }
    }
}
