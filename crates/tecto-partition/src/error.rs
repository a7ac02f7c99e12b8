// SPDX-License-Identifier: Apache-2.0
//! Failure taxonomy for [`crate::PartitionService::query`] (§4.8).

use tecto_materializer::InvariantViolation;
use tecto_polygon::PolygonizationException;
use thiserror::Error;

/// One non-fatal finding attached to a [`PartitionException`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Short machine-stable category for this finding.
    pub kind: &'static str,
    /// Human-readable detail.
    pub detail: String,
}

/// What kind of failure a partition request ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// The request itself is malformed (negative epsilon, inconsistent
    /// sampling options). Rejected before the event log is touched.
    InvalidInput,
    /// The underlying event stream violates a structural invariant and
    /// cannot be materialized.
    InvalidTopology,
    /// The materialized topology is well-formed but failed geometric
    /// validation during polygonization.
    ValidationFailed,
    /// Something went wrong that is not the caller's fault (log
    /// corruption, a malformed read).
    InternalError,
}

/// A request could not be accepted as given (§7). Reported to the caller
/// as-is; never logged as an internal fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A [`tecto_polygon::TolerancePolicy::Lenient`] epsilon was negative.
    #[error("tolerance epsilon must be >= 0, got {epsilon}")]
    NegativeEpsilon {
        /// The rejected epsilon value.
        epsilon: f64,
    },
    /// A sampling option was out of its valid range.
    #[error("invalid sampling options: {detail}")]
    InvalidSampling {
        /// Human-readable description of what was inconsistent.
        detail: String,
    },
}

/// Raised when [`crate::PartitionService::query`] cannot produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("partition query failed ({failure_type:?})")]
pub struct PartitionException {
    /// Coarse category of the failure.
    pub failure_type: FailureType,
    /// Findings that led to this failure.
    pub diagnostics: Vec<Diagnostic>,
}

impl PartitionException {
    pub(crate) fn internal(detail: impl Into<String>) -> Self {
        Self {
            failure_type: FailureType::InternalError,
            diagnostics: vec![Diagnostic {
                kind: "event-log-read-error",
                detail: detail.into(),
            }],
        }
    }
}

impl From<InputError> for PartitionException {
    fn from(error: InputError) -> Self {
        Self {
            failure_type: FailureType::InvalidInput,
            diagnostics: vec![Diagnostic {
                kind: "invalid-input",
                detail: error.to_string(),
            }],
        }
    }
}

impl From<InvariantViolation> for PartitionException {
    fn from(violation: InvariantViolation) -> Self {
        Self {
            failure_type: FailureType::InvalidTopology,
            diagnostics: vec![Diagnostic {
                kind: "invariant-violation",
                detail: violation.to_string(),
            }],
        }
    }
}

impl From<PolygonizationException> for PartitionException {
    fn from(exception: PolygonizationException) -> Self {
        let diagnostics = exception
            .diagnostics()
            .iter()
            .map(|diagnostic| Diagnostic {
                kind: diagnostic.kind,
                detail: diagnostic.detail.clone(),
            })
            .collect();
        Self {
            failure_type: FailureType::ValidationFailed,
            diagnostics,
        }
    }
}
