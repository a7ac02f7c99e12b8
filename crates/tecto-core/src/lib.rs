// SPDX-License-Identifier: Apache-2.0
//! tecto-core: integration facade for the tectonic-plate topology engine.
//!
//! This crate adds no behavior of its own. It re-exports the public surface
//! of every component crate under one namespace, the way `warp-core::lib`
//! re-exports its own internal modules, and hosts the end-to-end scenario
//! tests that exercise them together.
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

/// Identifiers, ticks, and stream identity.
pub use tecto_ids::{
    BoundaryId, CanonicalTick, Hash, JunctionId, PlateId, TruthStreamIdentity, EMPTY_HASH,
};

/// Spherical geometry primitives.
pub use tecto_geom::{spherical_excess_area, Polyline3, SurfacePoint};

/// Event payloads and the canonical wire encoding.
pub use tecto_codec::{
    canonical_decode, canonical_encode, chain_hashes, compute_event_hash, compute_event_id,
    genesis_previous_hash, verify_event_hash, BoundaryKind, CodecError, EventKindTag,
    TopologyEvent,
};

/// The ordered key-value substrate and its in-memory implementation.
pub use tecto_kv::{MemoryKv, OrderedKv, Put};

/// The append-only, hash-chained event log.
pub use tecto_eventlog::{
    decode_record, encode_record, event_key, stream_prefix, AppendError, DecodedRecord,
    EventLog, LoggedEvent, PendingEvent, ReadError, RecordBytes,
};

/// Event-to-state folding and invariant checking.
pub use tecto_materializer::{
    materialize, validate, Boundary, Cutoff, Diagnostic as MaterializerDiagnostic, InvariantKind,
    InvariantViolation, Junction, Plate, PlateTopologyState,
};

/// The materialization/partition result cache.
pub use tecto_cache::{
    materialization_variant_bytes, partition_variant_bytes, snapshot_key, CacheKey, CacheMetrics,
    PartitionCache, SnapshotReadError, SnapshotStore,
};

/// The read-only plate-adjacency graph projection.
pub use tecto_graph::{CborExportError, GraphEdge, GraphNode, PlateAdjacencyGraph};

/// The combinatorial-map polygonizer.
pub use tecto_polygon::{
    characteristic_epsilon, extract_faces, min_nonzero_endpoint_distance, polygonize,
    polygonize_with_escalation, ring_vertices, CombinatorialMap, Dart, DartId,
    Diagnostic as PolygonizationDiagnostic, Direction, Face, Polygon,
    PolygonizationException, PolygonSet, PolygonizeOptions, PolygonizeOutcome, QualityMetrics,
    SamplingSpec, TolerancePolicy, EPSILON_MAX, EPSILON_MIN, ESCALATION_FACTOR,
    SLIVER_AREA_THRESHOLD,
};

/// The kinematics-view seam.
pub use tecto_kinematics::{KinematicsView, NullKinematics, Quaternion};

/// The partition query service.
pub use tecto_partition::{
    algorithm_hash, CacheOptions, Diagnostic as PartitionDiagnostic, FailureType,
    PartitionException, PartitionRequest, PartitionResult, PartitionService, PartitionStatus,
    Provenance, POLYGONIZER_VERSION,
};
