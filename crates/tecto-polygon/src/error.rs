// SPDX-License-Identifier: Apache-2.0
//! Errors surfaced by combinatorial-map construction and polygonization.

use tecto_ids::BoundaryId;

/// One non-fatal or fatal finding produced while building or walking the
/// combinatorial map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Short machine-stable category for this finding.
    pub kind: &'static str,
    /// Human-readable detail, including the offending entity's id.
    pub detail: String,
}

impl Diagnostic {
    pub(crate) fn new(kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// A tolerance policy was given an out-of-range parameter (§4.7, §7).
/// Reported to the caller as-is, before any combinatorial-map work starts.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("tolerance epsilon must be >= 0, got {epsilon}")]
pub struct InputError {
    /// The rejected epsilon value.
    pub epsilon: f64,
}

/// Fatal failure of combinatorial-map construction or face extraction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolygonizationException {
    /// A boundary endpoint is not incident to any live junction.
    #[error("boundary {boundary_id} has an open endpoint")]
    OpenBoundary {
        /// The offending boundary.
        boundary_id: BoundaryId,
        /// Accumulated diagnostics up to the point of failure.
        diagnostics: Vec<Diagnostic>,
    },
    /// A junction's incident darts could not be cyclically ordered.
    #[error("junction is non-manifold")]
    NonManifoldJunction {
        /// Accumulated diagnostics up to the point of failure.
        diagnostics: Vec<Diagnostic>,
    },
    /// Two boundary geometries overlap outside a shared endpoint.
    #[error("boundaries {first} and {second} overlap")]
    UnresolvedOverlap {
        /// The first offending boundary.
        first: BoundaryId,
        /// The second offending boundary.
        second: BoundaryId,
        /// Accumulated diagnostics up to the point of failure.
        diagnostics: Vec<Diagnostic>,
    },
    /// A non-retired plate did not end up labeling any face orbit.
    #[error("plate has no corresponding face")]
    UnattributedPlate {
        /// Accumulated diagnostics up to the point of failure.
        diagnostics: Vec<Diagnostic>,
    },
    /// The requested tolerance policy itself was malformed.
    #[error(transparent)]
    InvalidTolerance(#[from] InputError),
}

impl PolygonizationException {
    /// Diagnostics accumulated regardless of which variant this is. Empty
    /// for [`Self::InvalidTolerance`], which fails before any map work
    /// (and so any diagnostic collection) starts.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::OpenBoundary { diagnostics, .. }
            | Self::NonManifoldJunction { diagnostics }
            | Self::UnresolvedOverlap { diagnostics, .. }
            | Self::UnattributedPlate { diagnostics } => diagnostics,
            Self::InvalidTolerance(_) => &[],
        }
    }
}

pub(crate) fn diag(kind: &'static str, detail: impl Into<String>) -> Diagnostic {
    Diagnostic::new(kind, detail)
}
