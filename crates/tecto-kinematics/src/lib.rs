// SPDX-License-Identifier: Apache-2.0
//! Kinematics-view seam for the tectonic topology engine.
//!
//! Ships only the interface a rotation solver would plug into: the
//! [`KinematicsView`] trait, a plain [`Quaternion`], and a [`NullKinematics`]
//! test double. No solver is implemented here or anywhere in this workspace.
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

mod quaternion;
mod view;

pub use quaternion::Quaternion;
pub use view::{KinematicsView, NullKinematics};
