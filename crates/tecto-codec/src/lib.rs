// SPDX-License-Identifier: Apache-2.0
//! Event codec: typed events, canonical encoding, and the hash-chain
//! primitives layered on top of it (§4.2).
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

mod canonical;
mod chain;
mod error;
mod event;

pub use canonical::{canonical_decode, canonical_encode};
pub use chain::{
    chain_hashes, compute_event_hash, compute_event_id, genesis_previous_hash, verify_event_hash,
};
pub use error::CodecError;
pub use event::{BoundaryKind, EventKindTag, TopologyEvent};
