// SPDX-License-Identifier: Apache-2.0
//! Combinatorial map construction from a materialized topology state (§4.7).
//!
//! Darts and the *α*/*σ* permutations are stored as parallel index arrays
//! (`Vec<Dart>`, `alpha: Vec<DartId>`, `sigma: Vec<DartId>`) rather than a
//! pointer-linked structure, matching this engine's adjacency-array
//! conventions for graph-shaped data.

use std::collections::BTreeMap;

use tecto_geom::SurfacePoint;
use tecto_ids::{BoundaryId, JunctionId};
use tecto_materializer::PlateTopologyState;

use crate::dart::{Dart, DartId, Direction};
use crate::error::{diag, Diagnostic, PolygonizationException};
use crate::tolerance::TolerancePolicy;

/// A combinatorial map built from one topology state's live boundaries and
/// junctions.
pub struct CombinatorialMap {
    darts: Vec<Dart>,
    alpha: Vec<DartId>,
    sigma: Vec<DartId>,
    /// For each dart, the source-vertex location and owning junction.
    sources: Vec<(SurfacePoint, JunctionId)>,
    /// Non-fatal findings recorded while building the map (snapped
    /// endpoints, near-tied junction angles, tolerated overlaps).
    diagnostics: Vec<Diagnostic>,
}

impl CombinatorialMap {
    /// Number of darts in the map (always even: two per live boundary).
    #[must_use]
    pub fn dart_count(&self) -> usize {
        self.darts.len()
    }

    /// The dart at `id`.
    #[must_use]
    pub fn dart(&self, id: DartId) -> Dart {
        self.darts[id]
    }

    /// `alpha(d)`: the opposite dart of the same boundary.
    #[must_use]
    pub fn alpha(&self, id: DartId) -> DartId {
        self.alpha[id]
    }

    /// `sigma(d)`: the next dart around `d`'s source vertex.
    #[must_use]
    pub fn sigma(&self, id: DartId) -> DartId {
        self.sigma[id]
    }

    /// `phi(d) = sigma(alpha(d))`: the next dart of the same face.
    #[must_use]
    pub fn phi(&self, id: DartId) -> DartId {
        self.sigma(self.alpha(id))
    }

    /// Junction a dart departs from.
    #[must_use]
    pub fn source_junction(&self, id: DartId) -> JunctionId {
        self.sources[id].1
    }

    /// All dart ids, in construction order (boundary-id-sorted, forward then
    /// backward per boundary).
    pub fn dart_ids(&self) -> impl Iterator<Item = DartId> {
        0..self.darts.len()
    }

    /// Non-fatal findings recorded while building this map.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Builds the map for every non-retired boundary/junction in `state`.
    ///
    /// # Errors
    /// Returns [`PolygonizationException`] if, under `policy`, any boundary
    /// endpoint is open or any junction's dart star cannot be cyclically
    /// ordered (a tangent-angle tie within `epsilon`).
    pub fn build(
        state: &PlateTopologyState,
        policy: TolerancePolicy,
    ) -> Result<Self, PolygonizationException> {
        let mut diagnostics = Vec::new();
        // `Strict` never snaps: an endpoint must coincide with its junction
        // exactly, not merely within `EPSILON_MAX`.
        let epsilon = policy.epsilon().unwrap_or(0.0);

        let live_boundaries: Vec<_> = state
            .boundaries
            .values()
            .filter(|boundary| !boundary.retired)
            .collect();

        // Map each boundary endpoint to the junction incident to it, via the
        // junction's explicit `boundary_ids` membership (authoritative) with
        // a geometric sanity check against `epsilon`.
        let mut endpoint_junction: BTreeMap<(BoundaryId, bool), JunctionId> = BTreeMap::new();
        for junction in state.junctions.values().filter(|j| !j.retired) {
            for &boundary_id in &junction.boundary_ids {
                let Some(boundary) = state.boundaries.get(&boundary_id) else {
                    continue;
                };
                if boundary.retired {
                    continue;
                }
                let (Some(first), Some(last)) =
                    (boundary.geometry.first(), boundary.geometry.last())
                else {
                    continue;
                };
                let at_first = junction.location.great_circle_distance(first) <= epsilon;
                let at_last = junction.location.great_circle_distance(last) <= epsilon;
                if at_first {
                    endpoint_junction.insert((boundary_id, true), junction.junction_id);
                }
                if at_last {
                    endpoint_junction.insert((boundary_id, false), junction.junction_id);
                }
            }
        }

        let mut darts = Vec::with_capacity(live_boundaries.len() * 2);
        let mut sources = Vec::with_capacity(live_boundaries.len() * 2);
        let mut alpha = Vec::with_capacity(live_boundaries.len() * 2);
        let mut tangent_targets = Vec::with_capacity(live_boundaries.len() * 2);

        for boundary in &live_boundaries {
            let (Some(first), Some(last)) =
                (boundary.geometry.first(), boundary.geometry.last())
            else {
                continue;
            };

            let forward_junction = endpoint_junction.get(&(boundary.boundary_id, true));
            let backward_junction = endpoint_junction.get(&(boundary.boundary_id, false));

            let (Some(&fwd_j), Some(&bwd_j)) = (forward_junction, backward_junction) else {
                return Err(PolygonizationException::OpenBoundary {
                    boundary_id: boundary.boundary_id,
                    diagnostics: {
                        diagnostics.push(diag(
                            "open-boundary",
                            format!("boundary {} has an endpoint with no incident junction", boundary.boundary_id),
                        ));
                        diagnostics
                    },
                });
            };

            let forward_id = darts.len();
            darts.push(Dart {
                boundary_id: boundary.boundary_id,
                direction: Direction::Forward,
            });
            sources.push((first, fwd_j));

            let backward_id = darts.len();
            darts.push(Dart {
                boundary_id: boundary.boundary_id,
                direction: Direction::Backward,
            });
            sources.push((last, bwd_j));

            let forward_target = second_point_from_start(boundary.geometry.points());
            let backward_target = second_point_from_end(boundary.geometry.points());

            alpha.push(backward_id);
            alpha.push(forward_id);
            tangent_targets.push(forward_target);
            tangent_targets.push(backward_target);
        }

        let sigma = build_sigma(&darts, &sources, &tangent_targets, policy, &mut diagnostics)?;

        if let Some((first, second)) = detect_overlap(&live_boundaries, epsilon) {
            diagnostics.push(diag(
                "unresolved-overlap",
                format!("boundaries {first} and {second} overlap outside a shared endpoint"),
            ));
            if policy.epsilon().is_none() {
                return Err(PolygonizationException::UnresolvedOverlap {
                    first,
                    second,
                    diagnostics,
                });
            }
        }

        Ok(Self {
            darts,
            alpha,
            sigma,
            sources,
            diagnostics,
        })
    }
}

/// Finds the first pair of edges from two distinct live boundaries whose
/// great-circle arcs cross outside a shared endpoint (within `epsilon`).
///
/// Self-crossing geometry within a single boundary is left to the Open
/// Questions this engine's source left unresolved; only cross-boundary
/// overlaps are detected here, matching [`PolygonizationException::UnresolvedOverlap`]'s
/// two-boundary shape.
fn detect_overlap(
    live_boundaries: &[&tecto_materializer::Boundary],
    epsilon: f64,
) -> Option<(BoundaryId, BoundaryId)> {
    let edges: Vec<(BoundaryId, SurfacePoint, SurfacePoint)> = live_boundaries
        .iter()
        .flat_map(|boundary| {
            boundary
                .geometry
                .points()
                .windows(2)
                .map(move |pair| (boundary.boundary_id, pair[0], pair[1]))
        })
        .collect();

    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (id_a, a0, a1) = edges[i];
            let (id_b, b0, b1) = edges[j];
            if id_a == id_b || endpoints_coincide((a0, a1), (b0, b1), epsilon) {
                continue;
            }
            if arcs_cross((a0, a1), (b0, b1)) {
                return Some(if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) });
            }
        }
    }
    None
}

fn endpoints_coincide(
    a: (SurfacePoint, SurfacePoint),
    b: (SurfacePoint, SurfacePoint),
    epsilon: f64,
) -> bool {
    [(a.0, b.0), (a.0, b.1), (a.1, b.0), (a.1, b.1)]
        .into_iter()
        .any(|(p, q)| p.great_circle_distance(q) <= epsilon)
}

/// Whether great-circle arcs `a` and `b` cross, by the standard
/// side-of-great-circle test against each other's endpoints.
fn arcs_cross(a: (SurfacePoint, SurfacePoint), b: (SurfacePoint, SurfacePoint)) -> bool {
    let normal_a = a.0.cross(a.1);
    let normal_b = b.0.cross(b.1);
    let b_straddles_a = normal_a.dot(b.0).signum() != normal_a.dot(b.1).signum();
    let a_straddles_b = normal_b.dot(a.0).signum() != normal_b.dot(a.1).signum();
    b_straddles_a && a_straddles_b
}

/// The point just after `points.first()`, used to compute a dart's outgoing
/// tangent; falls back to the last point for a two-point boundary.
fn second_point_from_start(points: &[SurfacePoint]) -> SurfacePoint {
    points.get(1).copied().unwrap_or_else(|| points[points.len() - 1])
}

/// The point just before `points.last()`, the backward dart's counterpart
/// to [`second_point_from_start`].
fn second_point_from_end(points: &[SurfacePoint]) -> SurfacePoint {
    points
        .len()
        .checked_sub(2)
        .and_then(|idx| points.get(idx))
        .copied()
        .unwrap_or(points[0])
}

/// Orders darts around each junction by the tangent angle of their boundary
/// at that junction, breaking ties by `BoundaryId`, and builds the cyclic
/// `sigma` permutation from that ordering.
fn build_sigma(
    darts: &[Dart],
    sources: &[(SurfacePoint, JunctionId)],
    tangent_targets: &[SurfacePoint],
    policy: TolerancePolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<DartId>, PolygonizationException> {
    let mut by_junction: BTreeMap<JunctionId, Vec<DartId>> = BTreeMap::new();
    for (id, &(_, junction)) in sources.iter().enumerate() {
        by_junction.entry(junction).or_default().push(id);
    }

    let mut sigma = vec![0usize; darts.len()];
    for (_junction, incident) in by_junction {
        let anchor = sources[incident[0]].0;
        let (e1, e2) = tangent_basis(anchor);

        let mut ordered: Vec<(f64, BoundaryId, DartId)> = incident
            .iter()
            .map(|&dart_id| {
                let angle = angle_around(anchor, e1, e2, tangent_targets[dart_id]);
                (angle, darts[dart_id].boundary_id, dart_id)
            })
            .collect();

        ordered.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });

        for pair in ordered.windows(2) {
            sigma[pair[0].2] = pair[1].2;
        }
        if let (Some(last), Some(first)) = (ordered.last(), ordered.first()) {
            sigma[last.2] = first.2;
        }

        for window in ordered.windows(2) {
            if (window[0].0 - window[1].0).abs() < 1e-15 {
                diagnostics.push(diag(
                    "non-manifold-junction",
                    format!(
                        "boundaries {} and {} share an indistinguishable tangent angle",
                        window[0].1, window[1].1
                    ),
                ));
                // `Default` never reaches here directly (it is only ever
                // driven through `polygonize_with_escalation`, which always
                // passes `Lenient`), so `epsilon().is_none()` means `Strict`.
                if policy.epsilon().is_none() {
                    return Err(PolygonizationException::NonManifoldJunction {
                        diagnostics: diagnostics.clone(),
                    });
                }
            }
        }
    }

    Ok(sigma)
}

/// An orthonormal basis for the tangent plane at `point` on the unit sphere.
fn tangent_basis(point: SurfacePoint) -> (SurfacePoint, SurfacePoint) {
    let reference = if point.x.abs() < 0.9 {
        SurfacePoint::new(1.0, 0.0, 0.0)
    } else {
        SurfacePoint::new(0.0, 1.0, 0.0)
    };
    let e1 = project_tangent(point, reference);
    let e2 = point.cross(e1).normalized();
    (e1, e2)
}

fn project_tangent(point: SurfacePoint, reference: SurfacePoint) -> SurfacePoint {
    let d = point.dot(reference);
    SurfacePoint::new(
        reference.x - d * point.x,
        reference.y - d * point.y,
        reference.z - d * point.z,
    )
    .normalized()
}

fn angle_around(anchor: SurfacePoint, e1: SurfacePoint, e2: SurfacePoint, target: SurfacePoint) -> f64 {
    let tangent = project_tangent(anchor, target);
    tangent.dot(e2).atan2(tangent.dot(e1))
}
