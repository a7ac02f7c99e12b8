// SPDX-License-Identifier: Apache-2.0
//! Error taxonomy for the event log (§7).

use thiserror::Error;
use tecto_codec::CodecError;

/// Errors that can be raised by [`crate::EventLog::append`].
///
/// Appends are rejected without side effects on every variant here (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppendError {
    /// An event's declared stream does not match the stream being appended to.
    #[error("event declares a different stream than the append target")]
    StreamIdentityMismatch,
    /// The batch's sequence numbers are not a strict continuation of the
    /// stream's current length.
    #[error("non-monotonic sequence: expected {expected}, got {got}")]
    NonMonotonicSequence {
        /// The sequence number the log expected next.
        expected: u64,
        /// The sequence number actually supplied.
        got: u64,
    },
    /// Two events in the same batch carried the same sequence number.
    #[error("duplicate sequence {sequence} within one append batch")]
    DuplicateSequence {
        /// The sequence number that appeared more than once.
        sequence: u64,
    },
}

/// Errors that can be raised while reading/decoding a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// A stored record's magic bytes did not match `"PTEV"`.
    #[error("invalid record magic at key {key:?}")]
    InvalidMagic {
        /// The raw key of the offending record.
        key: Vec<u8>,
    },
    /// A stored record was truncated or otherwise malformed.
    #[error("malformed record at key {key:?}: {detail}")]
    MalformedRecord {
        /// The raw key of the offending record.
        key: Vec<u8>,
        /// Human-readable description of the decoding failure.
        detail: String,
    },
    /// A record's recomputed hash, or its link to the previous record,
    /// did not match what was stored (§4.3, §8 property 2).
    #[error("chain integrity failure at sequence {sequence}")]
    ChainIntegrityError {
        /// The sequence number at which verification failed.
        sequence: u64,
    },
    /// A record's framing verified but its payload bytes did not decode
    /// back into a typed event.
    #[error("payload decode failure at sequence {sequence}: {source}")]
    PayloadDecodeError {
        /// The sequence number of the offending record.
        sequence: u64,
        /// The underlying codec error.
        source: CodecError,
    },
}
