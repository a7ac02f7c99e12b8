// SPDX-License-Identifier: Apache-2.0
//! Partition query service (§4.8): reads a stream's event log, materializes
//! it to a cutoff, polygonizes the result, and memoizes it so repeated
//! requests for the same topology and options share one computation.
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

mod algorithm_hash;
mod error;
mod request;
mod result;
mod service;

pub use algorithm_hash::{algorithm_hash, POLYGONIZER_VERSION};
pub use error::{Diagnostic, FailureType, InputError, PartitionException};
pub use request::{CacheOptions, PartitionRequest};
pub use result::{PartitionResult, PartitionStatus, Provenance};
pub use service::PartitionService;
