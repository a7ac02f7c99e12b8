// SPDX-License-Identifier: Apache-2.0
//! Snapshot store: a second logical KV namespace holding serialized states (§4.5, §6).
//!
//! The framing mirrors the event record wire format: magic, version, then an
//! opaque payload blob. What the payload bytes mean (a serialized
//! `PlateTopologyState`) is a concern of the crate that persists snapshots,
//! not this one — `tecto-cache` only guarantees the framing round-trips and
//! that `persist` is idempotent (same key, newer payload replaces older).

use std::sync::Arc;

use tecto_kv::OrderedKv;

const SNAPSHOT_MAGIC: [u8; 4] = *b"PTSN";
const SNAPSHOT_VERSION: u16 = 1;

/// Errors returned while reading a stored snapshot record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotReadError {
    /// The stored bytes did not begin with the expected magic.
    #[error("snapshot record has invalid magic")]
    InvalidMagic,
    /// The stored bytes were shorter than the fixed header.
    #[error("snapshot record is truncated")]
    Truncated,
}

fn encode_snapshot(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + payload.len());
    out.extend_from_slice(&SNAPSHOT_MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn decode_snapshot(bytes: &[u8]) -> Result<&[u8], SnapshotReadError> {
    if bytes.len() < 6 {
        return Err(SnapshotReadError::Truncated);
    }
    if bytes[0..4] != SNAPSHOT_MAGIC {
        return Err(SnapshotReadError::InvalidMagic);
    }
    Ok(&bytes[6..])
}

/// Persisted key-value mapping `snapshot_key -> serialized state`, backed by
/// any [`OrderedKv`] implementation.
///
/// Distinct from [`crate::PartitionCache`]: this store is durable-shaped
/// (same substrate as the event log) rather than TTL-based, and `persist`
/// always succeeds by overwriting, matching the "same key, newer state
/// replaces older" idempotence rule.
pub struct SnapshotStore<K: OrderedKv> {
    kv: Arc<K>,
}

impl<K: OrderedKv> SnapshotStore<K> {
    /// Wraps an [`OrderedKv`] store as a snapshot namespace.
    pub fn new(kv: Arc<K>) -> Self {
        Self { kv }
    }

    /// Looks up the snapshot stored at `key`, if any.
    ///
    /// # Errors
    /// Returns [`SnapshotReadError`] if a record exists at `key` but is not
    /// validly framed.
    pub fn get_snapshot(&self, key: &[u8]) -> Result<Option<Vec<u8>>, SnapshotReadError> {
        let Some(bytes) = self.kv.get(key) else {
            return Ok(None);
        };
        decode_snapshot(&bytes).map(|payload| Some(payload.to_vec()))
    }

    /// Persists `payload` at `key`, replacing any prior snapshot.
    pub fn persist_snapshot(&self, key: &[u8], payload: &[u8]) {
        self.kv.put(key, &encode_snapshot(payload));
    }
}

/// Builds a snapshot key for `(stream_identity_hash, cutoff_variant_bytes)`.
///
/// Kept separate from [`crate::CacheKey`] (an in-memory-only type) because
/// snapshot keys are raw bytes suitable for an [`OrderedKv`] prefix scan,
/// not a fixed-width hash pair.
#[must_use]
pub fn snapshot_key(stream_identity_hash: tecto_ids::Hash, variant_bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + variant_bytes.len());
    out.extend_from_slice(&stream_identity_hash);
    out.extend_from_slice(variant_bytes);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tecto_kv::MemoryKv;

    #[test]
    fn round_trips_payload() {
        let store = SnapshotStore::new(Arc::new(MemoryKv::new()));
        let key = snapshot_key([1u8; 32], b"v1");
        assert_eq!(store.get_snapshot(&key).unwrap(), None);
        store.persist_snapshot(&key, b"state-bytes");
        assert_eq!(store.get_snapshot(&key).unwrap(), Some(b"state-bytes".to_vec()));
    }

    #[test]
    fn persisting_twice_replaces_the_prior_snapshot() {
        let store = SnapshotStore::new(Arc::new(MemoryKv::new()));
        let key = snapshot_key([1u8; 32], b"v1");
        store.persist_snapshot(&key, b"old");
        store.persist_snapshot(&key, b"new");
        assert_eq!(store.get_snapshot(&key).unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn malformed_record_is_rejected() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(b"k", b"not-a-snapshot");
        let store = SnapshotStore::new(kv);
        assert_eq!(store.get_snapshot(b"k"), Err(SnapshotReadError::InvalidMagic));
    }
}
