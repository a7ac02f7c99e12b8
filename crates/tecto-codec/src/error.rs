// SPDX-License-Identifier: Apache-2.0
//! Decode errors for canonical event bytes.

use thiserror::Error;

/// Errors produced while decoding canonically-encoded event bytes back into
/// a [`crate::TopologyEvent`].
///
/// Decoding is the inverse of `canonical_encode` and is used by the
/// materializer to recover typed events from a log that stores only bytes.
/// It is never used as part of the hash-chain itself (§4.2 defines hashing
/// purely in terms of the encoded bytes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The payload's kind tag did not match any known event kind.
    #[error("unknown event kind tag {tag}")]
    UnknownEventKind {
        /// The raw tag value encountered.
        tag: u16,
    },
    /// The payload's boundary-kind tag did not match any known variant.
    #[error("unknown boundary kind tag {tag}")]
    UnknownBoundaryKind {
        /// The raw tag value encountered.
        tag: u8,
    },
    /// The payload ended before a field's declared length was satisfied.
    #[error("truncated payload while reading {field}")]
    Truncated {
        /// Name of the field being read when truncation was detected.
        field: &'static str,
    },
    /// A string field was not valid UTF-8.
    #[error("invalid UTF-8 in field {field}")]
    InvalidUtf8 {
        /// Name of the field being read when the error was detected.
        field: &'static str,
    },
    /// Trailing bytes remained after decoding a complete event.
    #[error("{extra} trailing byte(s) after decoding event payload")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        extra: usize,
    },
}
