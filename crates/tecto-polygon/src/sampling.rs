// SPDX-License-Identifier: Apache-2.0
//! Sampling-spec options accepted and threaded through to provenance, even
//! though the boundary-analytics consumer of sampled points is out of scope
//! here (§6).

/// How densely to sample boundary geometry for downstream boundary
/// analytics. The polygonizer itself never reads these values beyond
/// validating and forwarding them; no consumer of sampled points exists in
/// this workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingSpec {
    /// Sample only the stored polyline vertices.
    VertexOnly {
        /// Minimum angular distance, in radians, a sample must keep from a
        /// junction before being excluded. A positive buffer drops the
        /// first and last vertex of each ring.
        junction_buffer_distance: f64,
    },
    /// Sample at a fixed angular interval along each boundary.
    FixedInterval {
        /// Interval between samples, in radians.
        interval: f64,
    },
}

impl SamplingSpec {
    /// Stable tag used when folding this spec into provenance/cache keys.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::VertexOnly { .. } => "vertex-only",
            Self::FixedInterval { .. } => "fixed-interval",
        }
    }

    /// Filters `ring` per this spec's exclusion rule.
    ///
    /// Only [`Self::VertexOnly`] with a positive `junction_buffer_distance`
    /// excludes anything: it drops the first and last vertex (the ones
    /// coincident with a junction), per the resolved exclusion rule for this
    /// option. [`Self::FixedInterval`] passes `ring` through unchanged, since
    /// no consumer in this workspace resamples boundary geometry.
    #[must_use]
    pub fn apply(self, ring: &[tecto_geom::SurfacePoint]) -> Vec<tecto_geom::SurfacePoint> {
        match self {
            Self::VertexOnly {
                junction_buffer_distance,
            } if junction_buffer_distance > 0.0 && ring.len() > 2 => {
                ring[1..ring.len() - 1].to_vec()
            }
            _ => ring.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tecto_geom::SurfacePoint;

    fn ring() -> Vec<SurfacePoint> {
        vec![
            SurfacePoint::new(1.0, 0.0, 0.0),
            SurfacePoint::new(0.0, 1.0, 0.0),
            SurfacePoint::new(0.0, 0.0, 1.0),
            SurfacePoint::new(1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn vertex_only_with_positive_buffer_drops_endpoints() {
        let spec = SamplingSpec::VertexOnly {
            junction_buffer_distance: 0.1,
        };
        assert_eq!(spec.apply(&ring()).len(), 2);
    }

    #[test]
    fn vertex_only_with_zero_buffer_keeps_all_vertices() {
        let spec = SamplingSpec::VertexOnly {
            junction_buffer_distance: 0.0,
        };
        assert_eq!(spec.apply(&ring()).len(), ring().len());
    }

    #[test]
    fn fixed_interval_passes_ring_through() {
        let spec = SamplingSpec::FixedInterval { interval: 0.05 };
        assert_eq!(spec.apply(&ring()), ring());
    }
}
