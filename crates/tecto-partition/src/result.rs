// SPDX-License-Identifier: Apache-2.0
//! The outcome of a partition query (§4.8).

use tecto_ids::{Hash, TruthStreamIdentity};
use tecto_polygon::{PolygonSet, QualityMetrics};

/// Whether a result came from the cache or was freshly computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStatus {
    /// Computed this call.
    Computed,
    /// Served from a prior call's cached result.
    CacheHit,
}

/// Traceability metadata attached to every [`PartitionResult`], useful for
/// log correlation and for explaining why two requests did or did not
/// share a cache slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// The stream this result was materialized from.
    pub topology_source: TruthStreamIdentity,
    /// Version tag of the polygonization algorithm that produced this
    /// result.
    pub polygonizer_version: &'static str,
    /// Milliseconds since the Unix epoch when this result was computed.
    /// Not part of any hash; wall-clock metadata only.
    pub computed_at_millis: u64,
    /// Content hash over `{polygonizer_version, tolerance policy class,
    /// sampling options}` — equal requests share this hash and therefore a
    /// cache slot; it is not itself part of the cache key.
    pub algorithm_hash: Hash,
    /// Hash of the cache key this request resolved to, carried for log
    /// correlation only (never used to look anything up).
    pub request_id: Hash,
}

/// Result of a successful partition query.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionResult {
    /// The produced polygon set.
    pub polygons: PolygonSet,
    /// Quality metrics from the polygonization run that produced this
    /// result (carried through unchanged on a cache hit).
    pub quality_metrics: QualityMetrics,
    /// Traceability metadata.
    pub provenance: Provenance,
    /// Whether this call computed the result or served it from cache.
    pub status: PartitionStatus,
    /// Whether the underlying topology state came from a persisted snapshot
    /// rather than a fresh fold over the event log (§4.5, §7) — set when the
    /// event-log read hit a [`tecto_eventlog::ReadError::ChainIntegrityError`]
    /// and a snapshot was used to recover.
    pub from_snapshot: bool,
}
