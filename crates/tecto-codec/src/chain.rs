// SPDX-License-Identifier: Apache-2.0
//! Hash chain primitives (§4.2, §8 property 2).

use tecto_ids::{Hash, TruthStreamIdentity, EMPTY_HASH};

/// Computes `hash(n) = H(previous_hash(n) || canonical_encoding(event(n)))`.
///
/// `previous_hash` must be [`EMPTY_HASH`] for the first event in a stream
/// (`sequence == 0`) and the `hash` of the preceding event otherwise.
#[must_use]
pub fn compute_event_hash(previous_hash: Hash, encoded_payload: &[u8]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"tecto:event-hash:v1:");
    hasher.update(&previous_hash);
    hasher.update(encoded_payload);
    *hasher.finalize().as_bytes()
}

/// Returns the `previous_hash` the first event in any stream must carry.
#[must_use]
pub fn genesis_previous_hash() -> Hash {
    EMPTY_HASH
}

/// Derives a deterministic, collision-resistant `event_id` for an event at
/// `sequence` within `stream`, from its canonically-encoded payload.
///
/// This engine mints content-derived ids rather than random ones so that
/// replaying the same log twice (e.g. from two independent snapshots)
/// produces identical `event_id`s.
#[must_use]
pub fn compute_event_id(
    stream: &TruthStreamIdentity,
    sequence: u64,
    encoded_payload: &[u8],
) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"tecto:event-id:v1:");
    hasher.update(&stream.identity_hash());
    hasher.update(&sequence.to_be_bytes());
    hasher.update(encoded_payload);
    *hasher.finalize().as_bytes()
}

/// Verifies that `candidate_hash` is the correct hash for an event with the
/// given `previous_hash` and encoded payload.
#[must_use]
pub fn verify_event_hash(previous_hash: Hash, encoded_payload: &[u8], candidate_hash: Hash) -> bool {
    compute_event_hash(previous_hash, encoded_payload) == candidate_hash
}

/// Computes the full hash chain for a sequence of encoded payloads, starting
/// from [`genesis_previous_hash`]. Returns the `(previous_hash, hash)` pair
/// for each payload in order. Exposed primarily for tests and for the event
/// log's append path, which must compute hashes identically regardless of
/// caller-supplied values (§4.3: "any caller-supplied hash fields are
/// overwritten").
#[must_use]
pub fn chain_hashes(encoded_payloads: &[Vec<u8>]) -> Vec<(Hash, Hash)> {
    let mut out = Vec::with_capacity(encoded_payloads.len());
    let mut previous = genesis_previous_hash();
    for payload in encoded_payloads {
        let hash = compute_event_hash(previous, payload);
        out.push((previous, hash));
        previous = hash;
    }
    out
}
