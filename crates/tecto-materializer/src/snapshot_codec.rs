// SPDX-License-Identifier: Apache-2.0
//! CBOR snapshot encoding of a [`PlateTopologyState`] (§4.5, §6).
//!
//! Mirrors `tecto-graph::cbor`'s shadow-struct pattern (ids as raw byte
//! arrays, a private serde type the public type is projected onto), except
//! round-tripping in both directions: a snapshot is read back into a real
//! `PlateTopologyState`, not just exported for inspection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tecto_codec::BoundaryKind;
use tecto_geom::{Polyline3, SurfacePoint};
use tecto_ids::{BoundaryId, JunctionId, PlateId, TruthStreamIdentity};

use crate::state::{Boundary, Junction, Plate, PlateTopologyState};

/// Errors returned while decoding a snapshot back into a [`PlateTopologyState`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotCodecError {
    /// The underlying `ciborium` writer failed.
    #[error("snapshot cbor serialization failed: {0}")]
    Serialize(#[from] ciborium::ser::Error<std::io::Error>),
    /// The underlying `ciborium` reader failed.
    #[error("snapshot cbor deserialization failed: {0}")]
    Deserialize(#[from] ciborium::de::Error<std::io::Error>),
    /// A stored boundary kind tag is not one this version understands.
    #[error("unknown boundary kind tag {tag}")]
    UnknownBoundaryKind {
        /// The offending tag byte.
        tag: u8,
    },
}

#[derive(Serialize, Deserialize)]
struct ShadowPoint {
    x: f64,
    y: f64,
    z: f64,
}

impl From<SurfacePoint> for ShadowPoint {
    fn from(point: SurfacePoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }
}

impl From<ShadowPoint> for SurfacePoint {
    fn from(point: ShadowPoint) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

#[derive(Serialize, Deserialize)]
struct ShadowPlate {
    plate_id: [u8; 16],
    retired: bool,
    retirement_reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ShadowBoundary {
    boundary_id: [u8; 16],
    left: [u8; 16],
    right: [u8; 16],
    kind: u8,
    geometry: Vec<ShadowPoint>,
    retired: bool,
    retirement_reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ShadowJunction {
    junction_id: [u8; 16],
    boundary_ids: Vec<[u8; 16]>,
    location: ShadowPoint,
    retired: bool,
    retirement_reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ShadowIdentity {
    variant: String,
    branch: String,
    l_level: u32,
    domain: String,
    model: String,
}

#[derive(Serialize, Deserialize)]
struct ShadowState {
    identity: ShadowIdentity,
    plates: Vec<ShadowPlate>,
    boundaries: Vec<ShadowBoundary>,
    junctions: Vec<ShadowJunction>,
    last_event_sequence: i64,
}

impl PlateTopologyState {
    /// Serializes this state as CBOR, suitable for [`tecto_cache::SnapshotStore`].
    ///
    /// # Errors
    /// Returns [`SnapshotCodecError`] if the underlying encoder fails.
    pub fn to_cbor(&self) -> Result<Vec<u8>, SnapshotCodecError> {
        let shadow = ShadowState {
            identity: ShadowIdentity {
                variant: self.identity.variant.clone(),
                branch: self.identity.branch.clone(),
                l_level: self.identity.l_level,
                domain: self.identity.domain.clone(),
                model: self.identity.model.clone(),
            },
            plates: self
                .plates
                .values()
                .map(|plate| ShadowPlate {
                    plate_id: *plate.plate_id.as_bytes(),
                    retired: plate.retired,
                    retirement_reason: plate.retirement_reason.clone(),
                })
                .collect(),
            boundaries: self
                .boundaries
                .values()
                .map(|boundary| ShadowBoundary {
                    boundary_id: *boundary.boundary_id.as_bytes(),
                    left: *boundary.left.as_bytes(),
                    right: *boundary.right.as_bytes(),
                    kind: boundary.kind.tag(),
                    geometry: boundary.geometry.points().iter().copied().map(ShadowPoint::from).collect(),
                    retired: boundary.retired,
                    retirement_reason: boundary.retirement_reason.clone(),
                })
                .collect(),
            junctions: self
                .junctions
                .values()
                .map(|junction| ShadowJunction {
                    junction_id: *junction.junction_id.as_bytes(),
                    boundary_ids: junction.boundary_ids.iter().map(|id| *id.as_bytes()).collect(),
                    location: junction.location.into(),
                    retired: junction.retired,
                    retirement_reason: junction.retirement_reason.clone(),
                })
                .collect(),
            last_event_sequence: self.last_event_sequence,
        };
        let mut out = Vec::new();
        ciborium::ser::into_writer(&shadow, &mut out)?;
        Ok(out)
    }

    /// Reconstructs a state from bytes produced by [`Self::to_cbor`].
    ///
    /// # Errors
    /// Returns [`SnapshotCodecError`] if `bytes` does not decode, or carries
    /// a boundary kind tag this version does not recognize.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, SnapshotCodecError> {
        let shadow: ShadowState = ciborium::de::from_reader(bytes)?;

        let mut boundaries = BTreeMap::new();
        for boundary in shadow.boundaries {
            let kind = BoundaryKind::from_tag(boundary.kind)
                .ok_or(SnapshotCodecError::UnknownBoundaryKind { tag: boundary.kind })?;
            let id = BoundaryId(boundary.boundary_id);
            boundaries.insert(
                id,
                Boundary {
                    boundary_id: id,
                    left: PlateId(boundary.left),
                    right: PlateId(boundary.right),
                    kind,
                    geometry: Polyline3::new(boundary.geometry.into_iter().map(SurfacePoint::from).collect()),
                    retired: boundary.retired,
                    retirement_reason: boundary.retirement_reason,
                },
            );
        }

        let mut plates = BTreeMap::new();
        for plate in shadow.plates {
            let id = PlateId(plate.plate_id);
            plates.insert(
                id,
                Plate {
                    plate_id: id,
                    retired: plate.retired,
                    retirement_reason: plate.retirement_reason,
                },
            );
        }

        let mut junctions = BTreeMap::new();
        for junction in shadow.junctions {
            let id = JunctionId(junction.junction_id);
            junctions.insert(
                id,
                Junction {
                    junction_id: id,
                    boundary_ids: junction.boundary_ids.into_iter().map(BoundaryId).collect(),
                    location: junction.location.into(),
                    retired: junction.retired,
                    retirement_reason: junction.retirement_reason,
                },
            );
        }

        Ok(Self {
            identity: TruthStreamIdentity::new(
                shadow.identity.variant,
                shadow.identity.branch,
                shadow.identity.l_level,
                shadow.identity.domain,
                shadow.identity.model,
            ),
            plates,
            boundaries,
            junctions,
            last_event_sequence: shadow.last_event_sequence,
            violations: Vec::new(),
        })
    }
}
