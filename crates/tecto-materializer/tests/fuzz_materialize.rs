// SPDX-License-Identifier: Apache-2.0
//! Materialization is a pure function of its inputs: folding the same
//! events twice yields structurally equal states (§8 property 3).
#![allow(missing_docs)]

use proptest::prelude::*;
use tecto_codec::TopologyEvent;
use tecto_eventlog::LoggedEvent;
use tecto_ids::{CanonicalTick, PlateId, TruthStreamIdentity};
use tecto_materializer::{materialize, Cutoff};

fn identity() -> TruthStreamIdentity {
    TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1")
}

fn plate_created_events(ids: &[u128]) -> Vec<LoggedEvent> {
    ids.iter()
        .enumerate()
        .map(|(sequence, id)| LoggedEvent {
            event_id: [sequence as u8; 32],
            sequence: sequence as u64,
            tick: CanonicalTick(sequence as i64),
            stream_identity: identity(),
            previous_hash: [0u8; 32],
            hash: [sequence as u8; 32],
            payload: TopologyEvent::PlateCreated { plate_id: PlateId::from_u128(*id) },
        })
        .collect()
}

proptest! {
    #[test]
    fn folding_the_same_events_twice_is_deterministic(ids in prop::collection::vec(any::<u128>(), 0..20)) {
        let events = plate_created_events(&ids);
        let first = materialize(&identity(), &events, Cutoff::All);
        let second = materialize(&identity(), &events, Cutoff::All);
        prop_assert_eq!(first.ok(), second.ok());
    }

    #[test]
    fn every_created_plate_is_present_in_the_folded_state(ids in prop::collection::hash_set(any::<u128>(), 0..20)) {
        let ids: Vec<u128> = ids.into_iter().collect();
        let events = plate_created_events(&ids);
        let state = materialize(&identity(), &events, Cutoff::All).expect("creation-only events always materialize");
        prop_assert_eq!(state.plates.len(), ids.len());
        for id in &ids {
            prop_assert!(state.plates.contains_key(&PlateId::from_u128(*id)));
        }
    }
}
