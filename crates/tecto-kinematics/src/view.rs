// SPDX-License-Identifier: Apache-2.0
//! The kinematics-view seam (§6): a trait a rotation solver would implement,
//! plus a null test double. No solver lives in this workspace.

use tecto_ids::{CanonicalTick, PlateId};

use crate::quaternion::Quaternion;

/// Exposes plate rotations at a given tick, without assuming tick
/// monotonicity: a caller may query ticks in any order, and an
/// implementation must not cache state keyed on "the previous call".
pub trait KinematicsView {
    /// Returns the rotation of `plate` at `tick`, or `None` if this view has
    /// no rotation data for that plate/tick pair.
    fn try_get_rotation(&self, plate: PlateId, tick: CanonicalTick) -> Option<Quaternion>;
}

/// A [`KinematicsView`] that never has rotation data.
///
/// Exists so that callers depending on the trait (e.g. the sampling-spec
/// plumbing threaded through `tecto-polygon`'s provenance fields) have a
/// concrete implementation to exercise before any real solver exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKinematics;

impl KinematicsView for NullKinematics {
    fn try_get_rotation(&self, _plate: PlateId, _tick: CanonicalTick) -> Option<Quaternion> {
        None
    }
}
