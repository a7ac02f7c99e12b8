// SPDX-License-Identifier: Apache-2.0
//! Append-only, hash-chained event log over an ordered key-value substrate.
//!
//! Keys are built so that a prefix scan over one stream yields records in
//! strictly increasing sequence order; see [`event_key`] and [`stream_prefix`].
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
mod keys;
mod log;
mod wire;

pub use error::{AppendError, ReadError};
pub use keys::{event_key, stream_prefix};
pub use log::{EventLog, LoggedEvent, PendingEvent};
pub use wire::{decode_record, encode_record, DecodedRecord, RecordBytes};
