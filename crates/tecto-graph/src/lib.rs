// SPDX-License-Identifier: Apache-2.0
//! Plate-adjacency graph derived from a materialized topology state.
//!
//! A read-only projection, not a source of truth: every value here is
//! recomputed from a [`tecto_materializer::PlateTopologyState`] on demand,
//! never persisted or mutated in place.
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

mod cbor;
mod graph;

pub use cbor::CborExportError;
pub use graph::{GraphEdge, GraphNode, PlateAdjacencyGraph};
