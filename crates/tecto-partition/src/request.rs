// SPDX-License-Identifier: Apache-2.0
//! Request-level option structs for [`crate::PartitionService::query`].
//!
//! Configuration lives entirely in these structs, populated by the
//! embedder at the call site — no environment or file loading (§1).

use std::time::Duration;

use tecto_ids::TruthStreamIdentity;
use tecto_materializer::Cutoff;
use tecto_polygon::{SamplingSpec, TolerancePolicy};

use crate::error::InputError;

/// How the cache should be consulted and updated for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// How long a freshly computed result stays valid, or `None` for no
    /// expiry.
    pub ttl: Option<Duration>,
    /// Skip both the lookup and the write-back, forcing a fresh compute.
    pub bypass_cache: bool,
}

impl CacheOptions {
    /// Cache consulted and updated with no expiry.
    #[must_use]
    pub fn cached_indefinitely() -> Self {
        Self {
            ttl: None,
            bypass_cache: false,
        }
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::cached_indefinitely()
    }
}

/// One request to materialize and polygonize a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionRequest {
    /// Which stream to read.
    pub stream: TruthStreamIdentity,
    /// Which prefix of the stream to materialize.
    pub cutoff: Cutoff,
    /// How strictly to tolerate open boundaries/non-manifold
    /// junctions/overlaps while polygonizing.
    pub tolerance_policy: TolerancePolicy,
    /// How densely to sample boundary geometry for downstream consumers.
    pub sampling: SamplingSpec,
    /// Cache lookup/write-back behavior for this request.
    pub cache_options: CacheOptions,
}

impl PartitionRequest {
    /// Rejects a negative tolerance epsilon or an out-of-range sampling
    /// option before the request touches the event log (§7).
    ///
    /// # Errors
    /// Returns [`InputError`] describing the first malformed option found.
    pub fn validate(&self) -> Result<(), InputError> {
        if let TolerancePolicy::Lenient { epsilon } = self.tolerance_policy {
            if epsilon < 0.0 {
                return Err(InputError::NegativeEpsilon { epsilon });
            }
        }
        match self.sampling {
            SamplingSpec::VertexOnly {
                junction_buffer_distance,
            } if junction_buffer_distance < 0.0 => Err(InputError::InvalidSampling {
                detail: format!("junction_buffer_distance must be >= 0, got {junction_buffer_distance}"),
            }),
            SamplingSpec::FixedInterval { interval } if interval <= 0.0 => Err(InputError::InvalidSampling {
                detail: format!("interval must be > 0, got {interval}"),
            }),
            SamplingSpec::VertexOnly { .. } | SamplingSpec::FixedInterval { .. } => Ok(()),
        }
    }
}
