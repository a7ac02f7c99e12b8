// SPDX-License-Identifier: Apache-2.0
//! Combinatorial-map polygonizer: turns a materialized plate topology into a
//! sphere-covering set of polygons (§4.7).
//!
//! Faces of the combinatorial map are the orbits of *φ = σ∘α*; each face is
//! attributed to the plate on its darts' left side and assembled into a
//! [`PolygonSet`] under a chosen [`TolerancePolicy`].
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

mod cmap;
mod dart;
mod error;
mod face;
mod polygon;
mod polygonize;
mod quality;
mod sampling;
mod tolerance;

pub use cmap::CombinatorialMap;
pub use dart::{Dart, DartId, Direction};
pub use error::{Diagnostic, InputError, PolygonizationException};
pub use face::{extract_faces, ring_vertices, Face};
pub use polygon::{Polygon, PolygonSet};
pub use polygonize::{
    min_nonzero_endpoint_distance, polygonize, polygonize_with_escalation, PolygonizeOptions,
    PolygonizeOutcome,
};
pub use quality::QualityMetrics;
pub use sampling::SamplingSpec;
pub use tolerance::{
    characteristic_epsilon, TolerancePolicy, EPSILON_MAX, EPSILON_MIN, ESCALATION_FACTOR,
    SLIVER_AREA_THRESHOLD,
};
