// SPDX-License-Identifier: Apache-2.0
//! A square loop separating two plates polygonizes to closed rings under
//! any non-negative lenient epsilon, and polygonizing the same topology
//! twice under the same policy is deterministic (§8 properties 7, 8).
#![allow(missing_docs)]

use proptest::prelude::*;
use tecto_codec::{BoundaryKind, TopologyEvent};
use tecto_eventlog::LoggedEvent;
use tecto_geom::{Polyline3, SurfacePoint};
use tecto_ids::{BoundaryId, CanonicalTick, JunctionId, PlateId, TruthStreamIdentity};
use tecto_materializer::{materialize, Cutoff};
use tecto_polygon::{polygonize, TolerancePolicy};

fn identity() -> TruthStreamIdentity {
    TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1")
}

fn logged(stream: &TruthStreamIdentity, sequence: u64, payload: TopologyEvent) -> LoggedEvent {
    LoggedEvent {
        event_id: [sequence as u8; 32],
        sequence,
        tick: CanonicalTick(sequence as i64),
        stream_identity: stream.clone(),
        previous_hash: [0u8; 32],
        hash: [0u8; 32],
        payload,
    }
}

fn corners() -> [SurfacePoint; 4] {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    [
        SurfacePoint::new(s, s, 0.0),
        SurfacePoint::new(-s, s, 0.0),
        SurfacePoint::new(-s, -s, 0.0),
        SurfacePoint::new(s, -s, 0.0),
    ]
}

fn square_loop_events() -> Vec<LoggedEvent> {
    let identity = identity();
    let plate_in = PlateId::from_u128(1);
    let plate_out = PlateId::from_u128(2);
    let corners = corners();
    let boundary_ids: Vec<BoundaryId> = (0..4).map(|k| BoundaryId::from_u128(100 + k)).collect();
    let junction_ids: Vec<JunctionId> = (0..4).map(|k| JunctionId::from_u128(200 + k)).collect();

    let mut events = vec![
        logged(&identity, 0, TopologyEvent::PlateCreated { plate_id: plate_in }),
        logged(&identity, 1, TopologyEvent::PlateCreated { plate_id: plate_out }),
    ];

    let mut sequence = 2u64;
    for k in 0..4usize {
        let geometry = Polyline3::new(vec![corners[k], corners[(k + 1) % 4]]);
        events.push(logged(
            &identity,
            sequence,
            TopologyEvent::BoundaryCreated {
                boundary_id: boundary_ids[k],
                left: plate_in,
                right: plate_out,
                kind: BoundaryKind::Transform,
                geometry,
            },
        ));
        sequence += 1;
    }
    for k in 0..4usize {
        let previous = (k + 3) % 4;
        events.push(logged(
            &identity,
            sequence,
            TopologyEvent::JunctionCreated {
                junction_id: junction_ids[k],
                boundary_ids: vec![boundary_ids[previous], boundary_ids[k]],
                location: corners[k],
            },
        ));
        sequence += 1;
    }

    events
}

proptest! {
    #[test]
    fn lenient_epsilon_still_yields_closed_rings(epsilon in 0.0f64..1e-3) {
        let events = square_loop_events();
        let state = materialize(&identity(), &events, Cutoff::All).expect("state materializes");
        let policy = TolerancePolicy::Lenient { epsilon };
        let outcome = polygonize(&state, policy).expect("lenient policy on a clean loop succeeds");

        for polygon in &outcome.polygons.polygons {
            prop_assert_eq!(polygon.outer_ring.first(), polygon.outer_ring.last());
        }
    }

    #[test]
    fn polygonizing_twice_under_the_same_policy_is_deterministic(epsilon in 0.0f64..1e-3) {
        let events = square_loop_events();
        let state = materialize(&identity(), &events, Cutoff::All).expect("state materializes");
        let policy = TolerancePolicy::Lenient { epsilon };

        let first = polygonize(&state, policy).expect("first run succeeds");
        let second = polygonize(&state, policy).expect("second run succeeds");

        prop_assert_eq!(first.polygons.polygons.len(), second.polygons.polygons.len());
        for (a, b) in first.polygons.polygons.iter().zip(second.polygons.polygons.iter()) {
            prop_assert_eq!(&a.outer_ring, &b.outer_ring);
            prop_assert_eq!(a.plate_id, b.plate_id);
        }
    }
}
