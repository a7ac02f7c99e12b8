// SPDX-License-Identifier: Apache-2.0
//! End-to-end scenarios exercising the whole engine through the facade's
//! re-exported surface, against a real in-memory event log rather than
//! hand-authored `LoggedEvent`s.
#![allow(missing_docs)]

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::Arc;

use tecto_core::{
    event_key, materialize, polygonize, BoundaryId, BoundaryKind, CacheOptions, CanonicalTick,
    Cutoff, EventLog, InvariantKind, JunctionId, MemoryKv, PartitionRequest, PartitionService,
    OrderedKv, PartitionStatus, PendingEvent, PlateId, PolygonizationException, Polyline3,
    ReadError, SamplingSpec, SurfacePoint, TolerancePolicy, TopologyEvent, TruthStreamIdentity,
};

fn identity() -> TruthStreamIdentity {
    TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1")
}

fn corners() -> [SurfacePoint; 4] {
    let s = FRAC_1_SQRT_2;
    [
        SurfacePoint::new(s, s, 0.0),
        SurfacePoint::new(-s, s, 0.0),
        SurfacePoint::new(-s, -s, 0.0),
        SurfacePoint::new(s, -s, 0.0),
    ]
}

/// Appends a two-plate square loop (four boundaries, four junctions) and
/// returns the ids of the two plates it separates.
fn seed_square_loop(log: &EventLog<MemoryKv>, stream: &TruthStreamIdentity) -> (PlateId, PlateId) {
    seed_square_loop_with_junction_offset(log, stream, 0.0)
}

/// Same as [`seed_square_loop`], but the first junction's location is
/// nudged `offset` radians along `z` away from its corner.
fn seed_square_loop_with_junction_offset(
    log: &EventLog<MemoryKv>,
    stream: &TruthStreamIdentity,
    offset: f64,
) -> (PlateId, PlateId) {
    let plate_in = PlateId::from_u128(1);
    let plate_out = PlateId::from_u128(2);
    let corners = corners();
    let boundary_ids: Vec<BoundaryId> = (0..4).map(|k| BoundaryId::from_u128(100 + k)).collect();
    let junction_ids: Vec<JunctionId> = (0..4).map(|k| JunctionId::from_u128(200 + k)).collect();

    let mut pending = vec![
        PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::PlateCreated { plate_id: plate_in },
        },
        PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::PlateCreated { plate_id: plate_out },
        },
    ];
    for k in 0..4usize {
        let geometry = Polyline3::new(vec![corners[k], corners[(k + 1) % 4]]);
        pending.push(PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::BoundaryCreated {
                boundary_id: boundary_ids[k],
                left: plate_in,
                right: plate_out,
                kind: BoundaryKind::Transform,
                geometry,
            },
        });
    }
    for k in 0..4usize {
        let previous = (k + 3) % 4;
        let location = if k == 0 {
            SurfacePoint::new(corners[0].x, corners[0].y, offset)
        } else {
            corners[k]
        };
        pending.push(PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::JunctionCreated {
                junction_id: junction_ids[k],
                boundary_ids: vec![boundary_ids[previous], boundary_ids[k]],
                location,
            },
        });
    }

    log.append(stream, pending).expect("seed events append");
    (plate_in, plate_out)
}

/// S1: a log reader must detect a tampered record rather than silently
/// trusting it.
#[test]
fn tampered_record_is_detected_on_read() {
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    log.append(
        &stream,
        vec![PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::PlateCreated {
                plate_id: PlateId::from_u128(1),
            },
        }],
    )
    .expect("append succeeds");

    let key = event_key(&stream, 0);
    let mut bytes = kv.get(&key).expect("record exists").to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    kv.put(&key, &bytes);

    let (events, error) = log.read(&stream, 0);
    assert!(events.is_empty());
    assert!(matches!(error, Some(ReadError::ChainIntegrityError { sequence: 0 })));
}

/// S2: materializing `AtTick` filters by tick rather than reordering by it.
#[test]
fn at_tick_cutoff_filters_rather_than_reorders() {
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    log.append(
        &stream,
        vec![
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(10),
                payload: TopologyEvent::PlateCreated {
                    plate_id: PlateId::from_u128(1),
                },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(30),
                payload: TopologyEvent::PlateCreated {
                    plate_id: PlateId::from_u128(2),
                },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(20),
                payload: TopologyEvent::PlateCreated {
                    plate_id: PlateId::from_u128(3),
                },
            },
        ],
    )
    .expect("append succeeds");

    let (events, error) = log.read(&stream, 0);
    assert!(error.is_none());
    let state = materialize(&stream, &events, Cutoff::AtTick(20)).expect("state materializes");
    assert_eq!(state.plates.len(), 2);
    assert!(state.plates.contains_key(&PlateId::from_u128(1)));
    assert!(state.plates.contains_key(&PlateId::from_u128(3)));
    assert!(!state.plates.contains_key(&PlateId::from_u128(2)));
}

/// S3 (FR-016): a boundary cannot be retired while a live junction still
/// references it, through a real append/read round trip.
#[test]
fn boundary_retirement_is_blocked_by_a_live_junction() {
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    let plate_a = PlateId::from_u128(1);
    let plate_b = PlateId::from_u128(2);
    let boundary = BoundaryId::from_u128(1);
    let junction = JunctionId::from_u128(1);
    let geometry = Polyline3::new(vec![SurfacePoint::new(1.0, 0.0, 0.0), SurfacePoint::new(0.0, 1.0, 0.0)]);

    log.append(
        &stream,
        vec![
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(0),
                payload: TopologyEvent::PlateCreated { plate_id: plate_a },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(0),
                payload: TopologyEvent::PlateCreated { plate_id: plate_b },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(0),
                payload: TopologyEvent::BoundaryCreated {
                    boundary_id: boundary,
                    left: plate_a,
                    right: plate_b,
                    kind: BoundaryKind::Transform,
                    geometry,
                },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(0),
                payload: TopologyEvent::JunctionCreated {
                    junction_id: junction,
                    boundary_ids: vec![boundary],
                    location: SurfacePoint::new(0.5, 0.5, 0.0),
                },
            },
            PendingEvent {
                declared_stream: stream.clone(),
                tick: CanonicalTick(0),
                payload: TopologyEvent::BoundaryRetired {
                    boundary_id: boundary,
                    reason: "resolved".into(),
                },
            },
        ],
    )
    .expect("append succeeds");

    let (events, error) = log.read(&stream, 0);
    assert!(error.is_none());
    let err = materialize(&stream, &events, Cutoff::All).expect_err("retirement must be rejected");
    assert_eq!(err.kind, InvariantKind::Fr016BoundaryDeletion);
}

/// S4: two plates separated by a closed loop polygonize to two rings
/// covering the whole sphere.
#[test]
fn square_loop_polygonizes_to_two_rings() {
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    let (plate_in, plate_out) = seed_square_loop(&log, &stream);

    let (events, error) = log.read(&stream, 0);
    assert!(error.is_none());
    let state = materialize(&stream, &events, Cutoff::All).expect("state materializes");
    let outcome = polygonize(&state, TolerancePolicy::Strict).expect("strict polygonization succeeds");

    assert_eq!(outcome.polygons.polygons.len(), 2);
    let plate_ids: Vec<PlateId> = outcome.polygons.polygons.iter().map(|polygon| polygon.plate_id).collect();
    assert!(plate_ids.contains(&plate_in));
    assert!(plate_ids.contains(&plate_out));
    let total_area = outcome.polygons.total_outer_area();
    assert!((total_area.abs() - 4.0 * PI).abs() < 1e-6);
}

/// S5: the same nudged-junction topology is rejected under `Strict`,
/// accepted once `Lenient`'s epsilon covers the gap, and rejected again
/// once it doesn't.
#[test]
fn tolerance_policy_trichotomy_on_a_nudged_junction() {
    const JUNCTION_GAP: f64 = 5e-10;
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    seed_square_loop_with_junction_offset(&log, &stream, JUNCTION_GAP);

    let (events, error) = log.read(&stream, 0);
    assert!(error.is_none());
    let state = materialize(&stream, &events, Cutoff::All).expect("state materializes");

    let strict_err = polygonize(&state, TolerancePolicy::Strict).expect_err("strict must reject the gap");
    assert!(matches!(strict_err, PolygonizationException::OpenBoundary { .. }));
    assert!(!strict_err.diagnostics().is_empty(), "diagnostics accumulated up to the failure should be reported");

    let covering = polygonize(&state, TolerancePolicy::Lenient { epsilon: 1e-9 });
    assert!(covering.is_ok(), "epsilon wider than the gap should accept it");

    let narrow_err = polygonize(&state, TolerancePolicy::Lenient { epsilon: 1e-12 })
        .expect_err("epsilon narrower than the gap must still reject it");
    assert!(matches!(narrow_err, PolygonizationException::OpenBoundary { .. }));
}

/// S6: identical requests against a `PartitionService` share a cache slot;
/// a request under a different tolerance policy does not.
#[test]
fn identical_partition_requests_share_a_cache_slot() {
    let stream = identity();
    let kv = Arc::new(MemoryKv::new());
    let log = EventLog::new(Arc::clone(&kv));
    seed_square_loop(&log, &stream);
    let service = PartitionService::new(EventLog::new(kv));

    let request = PartitionRequest {
        stream: stream.clone(),
        cutoff: Cutoff::All,
        tolerance_policy: TolerancePolicy::Strict,
        sampling: SamplingSpec::FixedInterval { interval: 0.1 },
        cache_options: CacheOptions::cached_indefinitely(),
    };

    let first = service.query(&request).expect("first query computes");
    assert_eq!(first.status, PartitionStatus::Computed);
    let second = service.query(&request).expect("second query hits cache");
    assert_eq!(second.status, PartitionStatus::CacheHit);
    assert_eq!(first.provenance.algorithm_hash, second.provenance.algorithm_hash);

    let mut lenient_request = request;
    lenient_request.tolerance_policy = TolerancePolicy::Lenient { epsilon: 1e-9 };
    let lenient = service.query(&lenient_request).expect("lenient query computes");
    assert_eq!(lenient.status, PartitionStatus::Computed);
    assert_ne!(first.provenance.algorithm_hash, lenient.provenance.algorithm_hash);
}
