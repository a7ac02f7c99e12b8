// SPDX-License-Identifier: Apache-2.0
//! Orchestration: read the event log, materialize, polygonize, and cache
//! the result (§4.8).

use std::time::{SystemTime, UNIX_EPOCH};

use tecto_cache::{materialization_variant_bytes, partition_variant_bytes, snapshot_key, CacheKey, PartitionCache, SnapshotStore};
use tecto_eventlog::{EventLog, ReadError};
use tecto_ids::{Hash, TruthStreamIdentity};
use tecto_kv::OrderedKv;
use tecto_materializer::{materialize, Cutoff, PlateTopologyState};

use crate::algorithm_hash::{algorithm_hash, POLYGONIZER_VERSION};
use crate::error::PartitionException;
use crate::request::PartitionRequest;
use crate::result::{PartitionResult, PartitionStatus, Provenance};

/// Materializes and polygonizes requests against one event log, memoizing
/// results keyed by topology and request variant.
///
/// A successful fresh materialization persists a snapshot of the resulting
/// state; if a later read of the same stream fails chain verification, the
/// most recently persisted snapshot at or below the requested cutoff is used
/// as a fallback instead of failing the whole query (§4.5, §7).
pub struct PartitionService<K: OrderedKv> {
    event_log: EventLog<K>,
    cache: PartitionCache<PartitionResult>,
    snapshot_store: SnapshotStore<K>,
}

impl<K: OrderedKv> PartitionService<K> {
    /// Builds a service over `event_log` with an empty cache.
    #[must_use]
    pub fn new(event_log: EventLog<K>) -> Self {
        let snapshot_store = SnapshotStore::new(event_log.kv());
        Self {
            event_log,
            cache: PartitionCache::new(),
            snapshot_store,
        }
    }

    /// Current cache hit/miss/entry counters.
    #[must_use]
    pub fn cache_metrics(&self) -> tecto_cache::CacheMetrics {
        self.cache.metrics()
    }

    /// Drops every cached result for `stream`, regardless of cutoff or
    /// tolerance policy.
    pub fn invalidate_topology(&self, stream: &TruthStreamIdentity) {
        self.cache.invalidate_by_topology(stream.identity_hash());
    }

    /// Resolves `request` to a [`PartitionResult`], serving a cached result
    /// when one exists for the same topology and request variant.
    ///
    /// # Errors
    /// Returns [`PartitionException`] if `request` is malformed (negative
    /// epsilon, inconsistent sampling options), the event stream fails to
    /// read, the materialized topology violates a structural invariant, or
    /// polygonization fails under the requested tolerance policy.
    #[tracing::instrument(skip(self, request), fields(stream = %request.stream))]
    pub fn query(&self, request: &PartitionRequest) -> Result<PartitionResult, PartitionException> {
        request.validate()?;

        let policy_hash = algorithm_hash(request.tolerance_policy, request.sampling);
        let cache_key = cache_key_for(request, policy_hash);
        let request_id = request_id_from_cache_key(cache_key);

        if !request.cache_options.bypass_cache {
            if let Some(mut cached) = self.cache.try_get(&cache_key) {
                cached.status = PartitionStatus::CacheHit;
                return Ok(cached);
            }
        }

        let (cutoff_tag, cutoff_value) = cutoff_tag_and_value(request.cutoff);
        let snap_key = snapshot_key(
            request.stream.identity_hash(),
            &materialization_variant_bytes(cutoff_tag, cutoff_value),
        );

        let (state, from_snapshot) = match self.event_log.read(&request.stream, 0) {
            (events, None) => {
                let state = materialize(&request.stream, &events, request.cutoff)?;
                match state.to_cbor() {
                    Ok(bytes) => self.snapshot_store.persist_snapshot(&snap_key, &bytes),
                    Err(error) => tracing::warn!(%error, "failed to persist snapshot"),
                }
                (state, false)
            }
            (_, Some(ReadError::ChainIntegrityError { sequence })) => {
                let snapshot = self
                    .snapshot_store
                    .get_snapshot(&snap_key)
                    .map_err(|error| PartitionException::internal(error.to_string()))?;
                let Some(bytes) = snapshot else {
                    return Err(PartitionException::internal(format!(
                        "chain integrity failure at sequence {sequence} with no snapshot fallback available"
                    )));
                };
                let state = PlateTopologyState::from_cbor(&bytes)
                    .map_err(|error| PartitionException::internal(error.to_string()))?;
                (state, true)
            }
            (_, Some(error)) => return Err(PartitionException::internal(error.to_string())),
        };

        let outcome = tecto_polygon::polygonize(&state, request.tolerance_policy)?;

        let result = PartitionResult {
            polygons: outcome.polygons,
            quality_metrics: outcome.quality_metrics,
            provenance: Provenance {
                topology_source: request.stream.clone(),
                polygonizer_version: POLYGONIZER_VERSION,
                computed_at_millis: now_millis(),
                algorithm_hash: policy_hash,
                request_id,
            },
            status: PartitionStatus::Computed,
            from_snapshot,
        };

        if !request.cache_options.bypass_cache {
            self.cache.set(cache_key, result.clone(), request.cache_options.ttl);
        }

        tracing::debug!(
            face_count = result.polygons.polygons.len(),
            request_id = %request_id_hex(request_id),
            "partition computed"
        );
        Ok(result)
    }
}

fn cache_key_for(request: &PartitionRequest, policy_hash: Hash) -> CacheKey {
    let (cutoff_tag, cutoff_value) = cutoff_tag_and_value(request.cutoff);
    let variant_bytes = partition_variant_bytes(cutoff_tag, cutoff_value, policy_hash);
    CacheKey::new(request.stream.identity_hash(), &variant_bytes)
}

fn cutoff_tag_and_value(cutoff: Cutoff) -> (u8, i64) {
    match cutoff {
        Cutoff::All => (0, 0),
        Cutoff::AtSequence(sequence) => (1, i64::try_from(sequence).unwrap_or(i64::MAX)),
        Cutoff::AtTick(tick) => (2, tick),
    }
}

fn request_id_from_cache_key(key: CacheKey) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"tecto:partition:request-id:v1:");
    hasher.update(&key.topology);
    hasher.update(&key.variant);
    *hasher.finalize().as_bytes()
}

fn request_id_hex(id: Hash) -> String {
    id.iter().take(8).map(|byte| format!("{byte:02x}")).collect()
}

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
