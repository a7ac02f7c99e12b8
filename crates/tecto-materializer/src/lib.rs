// SPDX-License-Identifier: Apache-2.0
//! Folds an append-only event log into a validated topology state.
//!
//! The fold ([`materialize`]) enforces structural invariants incrementally
//! and aborts on the first violation; [`validate`] runs a second, stateless
//! pass over a completed state to surface findings that fold cannot decide
//! incrementally.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions
)]

mod error;
mod fold;
mod snapshot_codec;
mod state;
mod validate;

pub use error::{InvariantKind, InvariantViolation};
pub use fold::{materialize, Cutoff};
pub use snapshot_codec::SnapshotCodecError;
pub use state::{Boundary, Diagnostic, Junction, Plate, PlateTopologyState};
pub use validate::validate;
