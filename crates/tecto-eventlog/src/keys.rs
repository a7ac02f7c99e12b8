// SPDX-License-Identifier: Apache-2.0
//! Event-log key layout (§4.3).
//!
//! ```text
//! "S:" || stream_variant || ":" || branch || ":L" || l_level || ":" || domain || ":M" || model || ":E:" || sequence_as_bigendian_u64
//! ```
//!
//! The big-endian sequence suffix ensures lexicographic iteration yields
//! events in sequence order for any one stream; the stream prefix isolates
//! streams sharing the same underlying [`tecto_kv::OrderedKv`].

use tecto_ids::TruthStreamIdentity;

/// Returns the key prefix identifying `stream`, with the trailing `"E:"`
/// event-namespace tag but no sequence suffix — a prefix scan against this
/// returns every event in the stream.
#[must_use]
pub fn stream_prefix(stream: &TruthStreamIdentity) -> Vec<u8> {
    let mut key = Vec::new();
    key.extend_from_slice(b"S:");
    key.extend_from_slice(stream.variant.as_bytes());
    key.extend_from_slice(b":");
    key.extend_from_slice(stream.branch.as_bytes());
    key.extend_from_slice(b":L");
    key.extend_from_slice(stream.l_level.to_string().as_bytes());
    key.extend_from_slice(b":");
    key.extend_from_slice(stream.domain.as_bytes());
    key.extend_from_slice(b":M");
    key.extend_from_slice(stream.model.as_bytes());
    key.extend_from_slice(b":E:");
    key
}

/// Returns the full key for the event at `sequence` within `stream`.
#[must_use]
pub fn event_key(stream: &TruthStreamIdentity, sequence: u64) -> Vec<u8> {
    let mut key = stream_prefix(stream);
    key.extend_from_slice(&sequence.to_be_bytes());
    key
}
