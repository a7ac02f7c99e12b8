// SPDX-License-Identifier: Apache-2.0
//! `MemoryKv` round-trips any put key/value pair, and `scan_prefix` always
//! returns its results in ascending lexicographic key order (§4.1).
#![allow(missing_docs)]

use proptest::prelude::*;
use tecto_kv::{MemoryKv, OrderedKv, Put};

proptest! {
    #[test]
    fn put_then_get_round_trips(
        key in prop::collection::vec(any::<u8>(), 0..16),
        value in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        let kv = MemoryKv::new();
        kv.put(&key, &value);
        let got = kv.get(&key);
        prop_assert_eq!(got.as_deref(), Some(value.as_slice()));
    }

    #[test]
    fn scan_prefix_is_ascending_and_all_prefixed(
        suffixes in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..4), 0..10),
    ) {
        let kv = MemoryKv::new();
        let prefix = b"p:".to_vec();
        let batch = suffixes
            .iter()
            .map(|suffix| {
                let mut key = prefix.clone();
                key.extend_from_slice(suffix);
                Put::new(key, suffix.clone())
            })
            .collect();
        kv.write_batch(batch);

        let rows = kv.scan_prefix(&prefix);
        for row in &rows {
            prop_assert!(row.0.starts_with(&prefix));
        }
        for pair in rows.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn last_key_with_prefix_is_the_scan_maximum(
        suffixes in prop::collection::vec(any::<u8>(), 1..10),
    ) {
        let kv = MemoryKv::new();
        let prefix = b"p:".to_vec();
        let batch = suffixes
            .iter()
            .map(|suffix| {
                let mut key = prefix.clone();
                key.push(*suffix);
                Put::new(key, vec![*suffix])
            })
            .collect();
        kv.write_batch(batch);

        let rows = kv.scan_prefix(&prefix);
        let expected = rows.last().map(|(key, _)| key.clone());
        prop_assert_eq!(kv.last_key_with_prefix(&prefix), expected);
    }
}
