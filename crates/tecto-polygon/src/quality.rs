// SPDX-License-Identifier: Apache-2.0
//! Per-run quality metrics collected during polygonization (§4.7).

use std::time::Duration;

use crate::error::Diagnostic;
use crate::polygon::PolygonSet;

/// Aggregate quality signals for one polygonization run.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetrics {
    /// Wall-clock time the run took.
    pub computation_time: Duration,
    /// Smallest polygon area seen (outer ring minus holes), or `0.0` if no
    /// polygons were produced.
    pub min_area: f64,
    /// Largest polygon area seen.
    pub max_area: f64,
    /// Number of faces extracted from the combinatorial map.
    pub face_count: usize,
    /// Number of open-boundary findings.
    pub open_boundary_count: usize,
    /// Number of non-manifold-junction findings.
    pub non_manifold_count: usize,
    /// Number of ambiguous-attribution findings.
    pub ambiguous_attribution_count: usize,
    /// Number of polygons flagged as slivers.
    pub sliver_count: usize,
}

impl QualityMetrics {
    /// Builds metrics from a completed run's diagnostics and output.
    #[must_use]
    pub fn collect(computation_time: Duration, polygons: &PolygonSet, diagnostics: &[Diagnostic]) -> Self {
        let areas: Vec<f64> = polygons.polygons.iter().map(|p| p.area).collect();
        let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);
        let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let count_kind = |kind: &str| diagnostics.iter().filter(|d| d.kind == kind).count();

        Self {
            computation_time,
            min_area: if areas.is_empty() { 0.0 } else { min_area },
            max_area: if areas.is_empty() { 0.0 } else { max_area },
            face_count: polygons.polygons.len(),
            open_boundary_count: count_kind("open-boundary"),
            non_manifold_count: count_kind("non-manifold-junction"),
            ambiguous_attribution_count: count_kind("ambiguous-attribution"),
            sliver_count: polygons.polygons.iter().filter(|p| p.is_sliver).count(),
        }
    }
}
