// SPDX-License-Identifier: Apache-2.0
//! The fold algorithm itself (§4.4).

use tecto_codec::TopologyEvent;
use tecto_eventlog::LoggedEvent;
use tecto_ids::TruthStreamIdentity;

use crate::error::{InvariantKind, InvariantViolation};
use crate::state::{boundary_from_event, junction_from_event, PlateTopologyState};

/// Where to stop folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// Fold every event in the stream.
    All,
    /// Fold every event whose `sequence <= s`.
    AtSequence(u64),
    /// Fold every event whose `tick <= t`. Ticks are not assumed monotone:
    /// an event is skipped (not a stop signal) when its tick exceeds `t`.
    AtTick(i64),
}

/// Folds `events` (assumed already sequence-ordered and chain-verified by
/// the caller) onto an empty state for `identity`, stopping or filtering
/// per `cutoff`.
///
/// # Errors
/// Returns [`InvariantViolation`] on the first event that would break a
/// structural invariant. The state accumulated up to that point is
/// discarded; callers must not treat it as valid.
#[tracing::instrument(skip(events), fields(stream = %identity, event_count = events.len()))]
pub fn materialize(
    identity: &TruthStreamIdentity,
    events: &[LoggedEvent],
    cutoff: Cutoff,
) -> Result<PlateTopologyState, InvariantViolation> {
    let mut state = PlateTopologyState::empty(identity.clone());
    let mut expected_sequence = 0u64;

    for event in events {
        if event.stream_identity != *identity {
            return Err(InvariantViolation {
                kind: InvariantKind::StreamIdentityMatch,
                sequence: event.sequence,
                entity_id: String::new(),
                detail: "event's declared stream does not match the materialization target"
                    .to_string(),
            });
        }

        if event.sequence != expected_sequence {
            return Err(InvariantViolation {
                kind: InvariantKind::SequenceContiguity,
                sequence: event.sequence,
                entity_id: String::new(),
                detail: format!(
                    "expected sequence {expected_sequence}, got {}",
                    event.sequence
                ),
            });
        }
        expected_sequence += 1;

        if let Cutoff::AtSequence(s) = cutoff {
            if event.sequence > s {
                break;
            }
        }
        if let Cutoff::AtTick(t) = cutoff {
            if event.tick.value() > t {
                // Tick filter only: skip applying this event without
                // stopping the fold, since ticks are not monotone.
                continue;
            }
        }

        apply_event(&mut state, event)?;
        state.last_event_sequence = event.sequence as i64;
    }

    tracing::debug!(last_event_sequence = state.last_event_sequence, "materialized");
    Ok(state)
}

fn apply_event(state: &mut PlateTopologyState, event: &LoggedEvent) -> Result<(), InvariantViolation> {
    let sequence = event.sequence;
    match &event.payload {
        TopologyEvent::PlateCreated { plate_id } => {
            if state.plates.contains_key(plate_id) {
                return Err(violation(
                    InvariantKind::ReferenceValidity,
                    sequence,
                    plate_id.to_string(),
                    "plate already exists",
                ));
            }
            state.insert_plate(*plate_id);
        }
        TopologyEvent::PlateRetired { plate_id, reason } => {
            let plate = state.plates.get_mut(plate_id).ok_or_else(|| {
                violation(
                    InvariantKind::ReferenceValidity,
                    sequence,
                    plate_id.to_string(),
                    "plate does not exist",
                )
            })?;
            if plate.retired {
                return Err(violation(
                    InvariantKind::LifecycleOrdering,
                    sequence,
                    plate_id.to_string(),
                    "plate is already retired",
                ));
            }
            plate.retired = true;
            plate.retirement_reason = Some(reason.clone());
        }
        TopologyEvent::BoundaryCreated {
            boundary_id,
            left,
            right,
            kind,
            geometry,
        } => {
            if state.boundaries.contains_key(boundary_id) {
                return Err(violation(
                    InvariantKind::ReferenceValidity,
                    sequence,
                    boundary_id.to_string(),
                    "boundary already exists",
                ));
            }
            if left == right {
                return Err(violation(
                    InvariantKind::BoundarySeparatesTwoPlates,
                    sequence,
                    boundary_id.to_string(),
                    "left and right plate are the same plate",
                ));
            }
            for plate_id in [left, right] {
                let plate = state.plates.get(plate_id).ok_or_else(|| {
                    violation(
                        InvariantKind::BoundarySeparatesTwoPlates,
                        sequence,
                        plate_id.to_string(),
                        "endpoint plate does not exist",
                    )
                })?;
                if plate.retired {
                    return Err(violation(
                        InvariantKind::BoundarySeparatesTwoPlates,
                        sequence,
                        plate_id.to_string(),
                        "endpoint plate is retired",
                    ));
                }
            }
            state.boundaries.insert(
                *boundary_id,
                boundary_from_event(*boundary_id, *left, *right, *kind, geometry.clone()),
            );
        }
        TopologyEvent::BoundaryTypeChanged {
            boundary_id,
            new_kind,
            ..
        } => {
            let boundary = require_non_retired_boundary(state, *boundary_id, sequence)?;
            boundary.kind = *new_kind;
        }
        TopologyEvent::BoundaryGeometryUpdated {
            boundary_id,
            new_geometry,
        } => {
            let boundary = require_non_retired_boundary(state, *boundary_id, sequence)?;
            boundary.geometry = new_geometry.clone();
        }
        TopologyEvent::BoundaryRetired { boundary_id, reason } => {
            let referencing = state.junctions_referencing(*boundary_id);
            if !referencing.is_empty() {
                return Err(violation(
                    InvariantKind::Fr016BoundaryDeletion,
                    sequence,
                    boundary_id.to_string(),
                    "boundary is still referenced by a non-retired junction",
                ));
            }
            let boundary = require_non_retired_boundary(state, *boundary_id, sequence)?;
            boundary.retired = true;
            boundary.retirement_reason = Some(reason.clone());
        }
        TopologyEvent::JunctionCreated {
            junction_id,
            boundary_ids,
            location,
        } => {
            if state.junctions.contains_key(junction_id) {
                return Err(violation(
                    InvariantKind::ReferenceValidity,
                    sequence,
                    junction_id.to_string(),
                    "junction already exists",
                ));
            }
            require_live_boundaries(state, boundary_ids, sequence)?;
            state.junctions.insert(
                *junction_id,
                junction_from_event(*junction_id, boundary_ids.clone(), *location),
            );
        }
        TopologyEvent::JunctionUpdated {
            junction_id,
            new_boundary_ids,
            new_location,
        } => {
            require_live_boundaries(state, new_boundary_ids, sequence)?;
            let junction = require_non_retired_junction(state, *junction_id, sequence)?;
            junction.boundary_ids.clone_from(new_boundary_ids);
            if let Some(location) = new_location {
                junction.location = *location;
            }
        }
        TopologyEvent::JunctionRetired { junction_id, reason } => {
            let junction = require_non_retired_junction(state, *junction_id, sequence)?;
            junction.retired = true;
            junction.retirement_reason = Some(reason.clone());
        }
    }
    Ok(())
}

fn violation(
    kind: InvariantKind,
    sequence: u64,
    entity_id: String,
    detail: &str,
) -> InvariantViolation {
    InvariantViolation {
        kind,
        sequence,
        entity_id,
        detail: detail.to_string(),
    }
}

fn require_non_retired_boundary(
    state: &mut PlateTopologyState,
    boundary_id: tecto_ids::BoundaryId,
    sequence: u64,
) -> Result<&mut crate::state::Boundary, InvariantViolation> {
    let boundary = state.boundaries.get_mut(&boundary_id).ok_or_else(|| {
        violation(
            InvariantKind::ReferenceValidity,
            sequence,
            boundary_id.to_string(),
            "boundary does not exist",
        )
    })?;
    if boundary.retired {
        return Err(violation(
            InvariantKind::LifecycleOrdering,
            sequence,
            boundary_id.to_string(),
            "boundary is already retired",
        ));
    }
    Ok(boundary)
}

fn require_non_retired_junction(
    state: &mut PlateTopologyState,
    junction_id: tecto_ids::JunctionId,
    sequence: u64,
) -> Result<&mut crate::state::Junction, InvariantViolation> {
    let junction = state.junctions.get_mut(&junction_id).ok_or_else(|| {
        violation(
            InvariantKind::ReferenceValidity,
            sequence,
            junction_id.to_string(),
            "junction does not exist",
        )
    })?;
    if junction.retired {
        return Err(violation(
            InvariantKind::LifecycleOrdering,
            sequence,
            junction_id.to_string(),
            "junction is already retired",
        ));
    }
    Ok(junction)
}


fn require_live_boundaries(
    state: &PlateTopologyState,
    boundary_ids: &[tecto_ids::BoundaryId],
    sequence: u64,
) -> Result<(), InvariantViolation> {
    for boundary_id in boundary_ids {
        let boundary = state.boundaries.get(boundary_id).ok_or_else(|| {
            violation(
                InvariantKind::NoOrphanJunctions,
                sequence,
                boundary_id.to_string(),
                "referenced boundary does not exist",
            )
        })?;
        if boundary.retired {
            return Err(violation(
                InvariantKind::NoOrphanJunctions,
                sequence,
                boundary_id.to_string(),
                "referenced boundary is retired",
            ));
        }
    }
    Ok(())
}
