// SPDX-License-Identifier: Apache-2.0
//! Thread-safe memoization for materialization/partition results, plus a
//! durable snapshot namespace for fast-path replay.
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

mod key;
mod memory;
mod snapshot;

pub use key::{materialization_variant_bytes, partition_variant_bytes, CacheKey};
pub use memory::{CacheMetrics, PartitionCache};
pub use snapshot::{snapshot_key, SnapshotReadError, SnapshotStore};
