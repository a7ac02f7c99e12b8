// SPDX-License-Identifier: Apache-2.0
//! Invariant taxonomy enforced while folding (§3.5).

use thiserror::Error;

/// Which of the eight structural invariants was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Sequence numbers did not continue contiguously from the prior event.
    SequenceContiguity,
    /// An event declared a stream other than the one being materialized.
    StreamIdentityMatch,
    /// A `BoundaryCreated` referenced a missing/retired plate, or `left == right`.
    BoundarySeparatesTwoPlates,
    /// A junction event referenced a missing or retired boundary.
    NoOrphanJunctions,
    /// A mutation targeted an already-retired entity.
    LifecycleOrdering,
    /// An event named an entity that does not yet exist.
    ReferenceValidity,
    /// A boundary was retired while a non-retired junction still referenced it.
    Fr016BoundaryDeletion,
}

impl InvariantKind {
    /// Stable name used in diagnostics and test assertions.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SequenceContiguity => "SequenceContiguity",
            Self::StreamIdentityMatch => "StreamIdentityMatch",
            Self::BoundarySeparatesTwoPlates => "BoundarySeparatesTwoPlates",
            Self::NoOrphanJunctions => "NoOrphanJunctions",
            Self::LifecycleOrdering => "LifecycleOrdering",
            Self::ReferenceValidity => "ReferenceValidity",
            Self::Fr016BoundaryDeletion => "FR-016 BoundaryDeletion",
        }
    }
}

/// Raised when folding an event would break a structural invariant.
///
/// Materialization aborts on the first violation; the state accumulated so
/// far is discarded by the caller (it is never partially valid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} violated at sequence {sequence} (entity {entity_id}): {detail}", kind.name())]
pub struct InvariantViolation {
    /// Which invariant failed.
    pub kind: InvariantKind,
    /// Sequence of the offending event.
    pub sequence: u64,
    /// Hex id of the entity primarily implicated.
    pub entity_id: String,
    /// Human-readable detail.
    pub detail: String,
}
