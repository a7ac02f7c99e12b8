// SPDX-License-Identifier: Apache-2.0
//! Cache keys (§4.5, §8 property 10).
//!
//! A key is split into a `topology` component (hash of the stream identity)
//! and a `variant` component (hash of the cutoff plus, for partitions, the
//! tolerance-policy hash). Keeping the two separate lets [`crate::PartitionCache::invalidate_by_topology`]
//! range-scan every variant of one topology without hashing them together.

use tecto_ids::Hash;

/// Composite cache key: which topology, and which request variant of it.
///
/// Ordered by `topology` first so that all variants of one topology are
/// adjacent in a [`std::collections::BTreeMap`], enabling a prefix-style
/// range scan — the same trick [`tecto_kv::MemoryKv`] uses for byte-string
/// prefixes, specialized to a two-hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    /// Hash of the stream identity this entry was computed from.
    pub topology: Hash,
    /// Hash of the cutoff (and, for partitions, the tolerance policy).
    pub variant: Hash,
}

impl CacheKey {
    /// Builds a key from a precomputed topology hash and the bytes that
    /// identify the request variant (e.g. cutoff framing plus an optional
    /// policy hash).
    #[must_use]
    pub fn new(topology: Hash, variant_bytes: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tecto:cache-key:variant:v1:");
        hasher.update(variant_bytes);
        Self {
            topology,
            variant: *hasher.finalize().as_bytes(),
        }
    }
}

/// Builds the variant bytes for a materialization-only request: just the
/// cutoff's own encoding.
#[must_use]
pub fn materialization_variant_bytes(cutoff_tag: u8, cutoff_value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    out.push(cutoff_tag);
    out.extend_from_slice(&cutoff_value.to_be_bytes());
    out
}

/// Builds the variant bytes for a partition request: the cutoff's encoding
/// followed by the tolerance-policy's content hash.
#[must_use]
pub fn partition_variant_bytes(cutoff_tag: u8, cutoff_value: i64, policy_hash: Hash) -> Vec<u8> {
    let mut out = materialization_variant_bytes(cutoff_tag, cutoff_value);
    out.extend_from_slice(&policy_hash);
    out
}
