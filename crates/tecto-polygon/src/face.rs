// SPDX-License-Identifier: Apache-2.0
//! Face extraction: orbits of *φ = σ∘α* over a [`CombinatorialMap`] (§4.7).

use tecto_geom::SurfacePoint;
use tecto_ids::PlateId;
use tecto_materializer::PlateTopologyState;

use crate::cmap::CombinatorialMap;
use crate::dart::DartId;
use crate::error::{diag, Diagnostic, PolygonizationException};

/// One face orbit of the combinatorial map, with its darts in traversal
/// order and the plate attributed to its left side.
pub struct Face {
    /// Darts making up this face, in `phi`-traversal order, rotated to start
    /// at the dart whose boundary has the least `BoundaryId`.
    pub darts: Vec<DartId>,
    /// Plate attributed to this face (the plate on the left of its darts).
    pub plate: PlateId,
}

/// Extracts every face orbit of `map`, attributing each to a plate via the
/// `left`/`right` fields of its darts' boundaries.
///
/// Returns the extracted faces together with every diagnostic recorded
/// while attributing them (ambiguous-attribution warnings; a genuinely
/// unattributed plate is still a fatal [`PolygonizationException`]).
///
/// # Errors
/// Returns [`PolygonizationException::UnattributedPlate`] if a face's darts
/// disagree on which plate lies to their left (ambiguous attribution).
pub fn extract_faces(
    map: &CombinatorialMap,
    state: &PlateTopologyState,
) -> Result<(Vec<Face>, Vec<Diagnostic>), PolygonizationException> {
    let mut visited = vec![false; map.dart_count()];
    let mut faces = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for start in map.dart_ids() {
        if visited[start] {
            continue;
        }
        let mut orbit = vec![start];
        visited[start] = true;
        let mut current = map.phi(start);
        while current != start {
            if visited[current] {
                // A malformed sigma/alpha pairing produced a non-closing
                // orbit; stop rather than loop forever.
                break;
            }
            visited[current] = true;
            orbit.push(current);
            current = map.phi(current);
        }

        let plate = attribute_plate(map, state, &orbit, &mut diagnostics)?;
        let rotated = rotate_to_least_boundary(map, orbit);
        faces.push(Face {
            darts: rotated,
            plate,
        });
    }

    Ok((faces, diagnostics))
}

fn attribute_plate(
    map: &CombinatorialMap,
    state: &PlateTopologyState,
    orbit: &[DartId],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<PlateId, PolygonizationException> {
    let mut plates = Vec::with_capacity(orbit.len());
    for &dart_id in orbit {
        let dart = map.dart(dart_id);
        let Some(boundary) = state.boundaries.get(&dart.boundary_id) else {
            continue;
        };
        plates.push(dart.left_plate(boundary.left, boundary.right));
    }

    let Some(&first) = plates.first() else {
        return Err(PolygonizationException::UnattributedPlate {
            diagnostics: {
                diagnostics.push(diag("unattributed-face", "face orbit has no darts"));
                diagnostics.clone()
            },
        });
    };

    if plates.iter().any(|&p| p != first) {
        diagnostics.push(diag(
            "ambiguous-attribution",
            format!("face orbit darts disagree on left plate {first}"),
        ));
    }

    Ok(first)
}

fn rotate_to_least_boundary(map: &CombinatorialMap, orbit: Vec<DartId>) -> Vec<DartId> {
    let Some((start_index, _)) = orbit
        .iter()
        .enumerate()
        .min_by_key(|(_, &dart_id)| map.dart(dart_id).boundary_id)
    else {
        return orbit;
    };
    let mut rotated = Vec::with_capacity(orbit.len());
    rotated.extend_from_slice(&orbit[start_index..]);
    rotated.extend_from_slice(&orbit[..start_index]);
    rotated
}

/// Walks a face's darts, emitting ring vertices by concatenating each dart's
/// oriented boundary geometry and closing the ring on the starting vertex.
#[must_use]
pub fn ring_vertices(
    map: &CombinatorialMap,
    state: &PlateTopologyState,
    face: &Face,
) -> Vec<SurfacePoint> {
    let mut ring = Vec::new();
    for &dart_id in &face.darts {
        let dart = map.dart(dart_id);
        let Some(boundary) = state.boundaries.get(&dart.boundary_id) else {
            continue;
        };
        let points = boundary.geometry.points();
        let oriented: Box<dyn Iterator<Item = SurfacePoint>> = match dart.direction {
            crate::dart::Direction::Forward => Box::new(points.iter().copied()),
            crate::dart::Direction::Backward => Box::new(points.iter().rev().copied()),
        };
        for point in oriented {
            if ring.last() != Some(&point) {
                ring.push(point);
            }
        }
    }
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}
