// SPDX-License-Identifier: Apache-2.0
//! Top-level polygonization entry points (§4.7).

use std::time::Instant;

use tecto_materializer::PlateTopologyState;

use crate::cmap::CombinatorialMap;
use crate::error::PolygonizationException;
use crate::face::{extract_faces, ring_vertices};
use crate::polygon::{Polygon, PolygonSet};
use crate::quality::QualityMetrics;
use crate::tolerance::{characteristic_epsilon, TolerancePolicy, ESCALATION_FACTOR, EPSILON_MAX};

/// Options controlling one polygonization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonizeOptions {
    /// Governs how strictly open boundaries/non-manifold junctions/overlaps
    /// are tolerated.
    pub tolerance_policy: TolerancePolicy,
}

/// Result of a successful polygonization run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonizeOutcome {
    /// The produced polygon set.
    pub polygons: PolygonSet,
    /// Collected quality metrics for this run.
    pub quality_metrics: QualityMetrics,
    /// The epsilon actually used (meaningful for [`TolerancePolicy::Default`],
    /// which may have escalated past its initial choice).
    pub epsilon_used: Option<f64>,
}

/// Builds the combinatorial map for `state`, extracts faces, and assembles
/// polygons, outer-ring-vs-hole selection by largest `|area|` per plate.
///
/// # Errors
/// Returns [`PolygonizationException::InvalidTolerance`] if `policy` carries
/// a negative epsilon, without touching the combinatorial map. Otherwise
/// returns [`PolygonizationException`] on open boundaries, non-manifold
/// junctions, or failed plate attribution, per `policy`.
#[tracing::instrument(skip(state), fields(plate_count = state.plates.len()))]
pub fn polygonize(
    state: &PlateTopologyState,
    policy: TolerancePolicy,
) -> Result<PolygonizeOutcome, PolygonizationException> {
    policy.validate()?;

    let started = Instant::now();
    let map = CombinatorialMap::build(state, policy)?;
    let (faces, face_diagnostics) = extract_faces(&map, state)?;
    let mut diagnostics = map.diagnostics().to_vec();
    diagnostics.extend(face_diagnostics);

    let mut by_plate: std::collections::BTreeMap<_, Vec<Vec<tecto_geom::SurfacePoint>>> =
        std::collections::BTreeMap::new();
    for face in &faces {
        let ring = ring_vertices(&map, state, face);
        by_plate.entry(face.plate).or_default().push(ring);
    }

    let mut polygons = Vec::with_capacity(by_plate.len());
    for (plate_id, mut rings) in by_plate {
        rings.sort_by(|a, b| {
            ring_area(b)
                .abs()
                .partial_cmp(&ring_area(a).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let Some(outer) = rings.first().cloned() else {
            continue;
        };
        let holes = rings.into_iter().skip(1).collect();
        polygons.push(Polygon::new(plate_id, outer, holes));
    }

    let polygon_set = PolygonSet { polygons };
    let elapsed = started.elapsed();
    let metrics = QualityMetrics::collect(elapsed, &polygon_set, &diagnostics);

    tracing::debug!(face_count = faces.len(), plate_count = polygon_set.polygons.len(), "polygonization complete");

    Ok(PolygonizeOutcome {
        polygons: polygon_set,
        quality_metrics: metrics,
        epsilon_used: policy.epsilon(),
    })
}

fn ring_area(ring: &[tecto_geom::SurfacePoint]) -> f64 {
    tecto_geom::spherical_excess_area(ring)
}

/// Runs [`polygonize`] under [`TolerancePolicy::Default`], escalating the
/// working epsilon by [`ESCALATION_FACTOR`] up to [`EPSILON_MAX`] on
/// failure.
///
/// # Errors
/// Returns the last [`PolygonizationException`] encountered if every
/// escalation step fails.
pub fn polygonize_with_escalation(
    state: &PlateTopologyState,
    min_nonzero_endpoint_distance: Option<f64>,
) -> Result<PolygonizeOutcome, PolygonizationException> {
    let mut epsilon = characteristic_epsilon(min_nonzero_endpoint_distance);
    loop {
        let attempt = polygonize(state, TolerancePolicy::Lenient { epsilon });
        match attempt {
            Ok(mut outcome) => {
                outcome.epsilon_used = Some(epsilon);
                return Ok(outcome);
            }
            Err(error) if epsilon < EPSILON_MAX => {
                let next = (epsilon * ESCALATION_FACTOR).min(EPSILON_MAX);
                if next <= epsilon {
                    return Err(error);
                }
                epsilon = next;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Computes the minimum non-zero great-circle distance between any two
/// distinct boundary endpoints in `state`, used to seed
/// [`polygonize_with_escalation`]'s initial epsilon.
#[must_use]
pub fn min_nonzero_endpoint_distance(state: &PlateTopologyState) -> Option<f64> {
    let endpoints: Vec<_> = state
        .boundaries
        .values()
        .filter(|boundary| !boundary.retired)
        .flat_map(|boundary| [boundary.geometry.first(), boundary.geometry.last()])
        .flatten()
        .collect();

    let mut min_distance = None;
    for i in 0..endpoints.len() {
        for j in (i + 1)..endpoints.len() {
            let distance = endpoints[i].great_circle_distance(endpoints[j]);
            if distance > 0.0 {
                min_distance = Some(min_distance.map_or(distance, |m: f64| m.min(distance)));
            }
        }
    }
    min_distance
}
