// SPDX-License-Identifier: Apache-2.0
//! Stateless cross-check run after a fold completes (§4.4).
//!
//! `validate` never mutates the state and never fails: it reports findings
//! that cannot be decided incrementally during fold, such as a boundary
//! whose endpoint plate was retired by a later event than the boundary's
//! own creation.

use crate::state::{Diagnostic, PlateTopologyState};

/// Runs every stateless consistency check against `state` and returns the
/// diagnostics found, in ascending entity-id order within each check.
#[must_use]
pub fn validate(state: &PlateTopologyState) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for boundary in state.boundaries.values() {
        if boundary.retired {
            continue;
        }
        for plate_id in [boundary.left, boundary.right] {
            let retired = state
                .plates
                .get(&plate_id)
                .map(|plate| plate.retired)
                .unwrap_or(true);
            if retired {
                diagnostics.push(Diagnostic {
                    kind: "dangling-boundary-endpoint",
                    detail: format!(
                        "boundary {boundary_id} is not retired but references retired or missing plate {plate_id}",
                        boundary_id = boundary.boundary_id,
                    ),
                });
            }
        }
    }

    for junction in state.junctions.values() {
        if junction.retired {
            continue;
        }
        for boundary_id in &junction.boundary_ids {
            let retired = state
                .boundaries
                .get(boundary_id)
                .map(|boundary| boundary.retired)
                .unwrap_or(true);
            if retired {
                diagnostics.push(Diagnostic {
                    kind: "dangling-junction-reference",
                    detail: format!(
                        "junction {junction_id} is not retired but references retired or missing boundary {boundary_id}",
                        junction_id = junction.junction_id,
                    ),
                });
            }
        }
    }

    diagnostics
}
