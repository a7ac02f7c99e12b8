// SPDX-License-Identifier: Apache-2.0
//! Canonical encoding of a `PlateCreated`/`PlateRetired` event round-trips
//! for any plate id and retirement reason (§8 property 1).
#![allow(missing_docs)]

use proptest::prelude::*;
use tecto_codec::{canonical_decode, canonical_encode, TopologyEvent};
use tecto_ids::PlateId;

proptest! {
    #[test]
    fn plate_created_round_trips(id in any::<u128>()) {
        let event = TopologyEvent::PlateCreated { plate_id: PlateId::from_u128(id) };
        let decoded = canonical_decode(&canonical_encode(&event));
        prop_assert_eq!(decoded, Ok(event));
    }

    #[test]
    fn plate_retired_round_trips(id in any::<u128>(), reason in ".{0,64}") {
        let event = TopologyEvent::PlateRetired { plate_id: PlateId::from_u128(id), reason };
        let decoded = canonical_decode(&canonical_encode(&event));
        prop_assert_eq!(decoded, Ok(event));
    }

    #[test]
    fn truncating_any_prefix_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = canonical_decode(&bytes);
    }
}
