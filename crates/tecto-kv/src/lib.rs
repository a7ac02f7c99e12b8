// SPDX-License-Identifier: Apache-2.0
//! Ordered byte-level key-value store substrate (§4.1, C1).
//!
//! This crate deliberately knows nothing about events, hashing, or schema —
//! it is a substrate, keeping the same "no content-level concerns" split
//! between a pure byte store and the higher layers that give those bytes
//! meaning.
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

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// A single `(key, value)` write in a [`OrderedKv::write_batch`] call.
#[derive(Debug, Clone)]
pub struct Put {
    /// Key to write.
    pub key: Vec<u8>,
    /// Value to associate with `key`.
    pub value: Arc<[u8]>,
}

impl Put {
    /// Builds a [`Put`] from owned key and value bytes.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: Arc::from(value.into().into_boxed_slice()),
        }
    }
}

/// An ordered byte-level key-value store.
///
/// Implementations must guarantee lexicographic iteration order and that
/// [`write_batch`](OrderedKv::write_batch) is atomic: either every put in
/// the batch becomes visible, or none do. Reads never observe a partial
/// batch (§5).
pub trait OrderedKv: Send + Sync {
    /// Writes a single key/value pair.
    fn put(&self, key: &[u8], value: &[u8]);

    /// Reads the value stored at `key`, if any.
    fn get(&self, key: &[u8]) -> Option<Arc<[u8]>>;

    /// Atomically applies every put in `batch`.
    fn write_batch(&self, batch: Vec<Put>);

    /// Returns all `(key, value)` pairs whose key starts with `prefix`, in
    /// ascending lexicographic key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Arc<[u8]>)>;

    /// Returns the greatest key with the given prefix, if any exist.
    fn last_key_with_prefix(&self, prefix: &[u8]) -> Option<Vec<u8>>;
}

/// In-memory [`OrderedKv`] implementation backed by a `BTreeMap`.
///
/// `BTreeMap` iteration is lexicographic over its key type by construction,
/// which is what gives [`MemoryKv::scan_prefix`] its ordering guarantee
/// without any extra sorting step — the same property `warp-core::snapshot`
/// leans on for deterministic node iteration.
pub struct MemoryKv {
    inner: RwLock<BTreeMap<Vec<u8>, Arc<[u8]>>>,
}

impl MemoryKv {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the number of keys currently stored, or `0` if the internal
    /// lock is poisoned by a prior panicking writer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedKv for MemoryKv {
    fn put(&self, key: &[u8], value: &[u8]) {
        self.write_batch(vec![Put::new(key.to_vec(), value.to_vec())]);
    }

    fn get(&self, key: &[u8]) -> Option<Arc<[u8]>> {
        let guard = self.inner.read().ok()?;
        guard.get(key).cloned()
    }

    fn write_batch(&self, batch: Vec<Put>) {
        // A single write-lock acquisition makes the whole batch atomic with
        // respect to any reader taking the read lock (§5: "the whole batch
        // is committed atomically").
        if let Ok(mut guard) = self.inner.write() {
            for put in batch {
                guard.insert(put.key, put.value);
            }
        }
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Arc<[u8]>)> {
        let Ok(guard) = self.inner.read() else {
            return Vec::new();
        };
        guard
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn last_key_with_prefix(&self, prefix: &[u8]) -> Option<Vec<u8>> {
        let Ok(guard) = self.inner.read() else {
            return None;
        };
        guard
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .last()
            .map(|(k, _)| k.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_prefix_returns_lexicographic_order() {
        let kv = MemoryKv::new();
        kv.put(b"a:2", b"two");
        kv.put(b"a:1", b"one");
        kv.put(b"b:1", b"other-prefix");
        let got = kv.scan_prefix(b"a:");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].0, b"a:1");
        assert_eq!(got[1].0, b"a:2");
    }

    #[test]
    fn write_batch_is_visible_all_or_nothing_after_return() {
        let kv = MemoryKv::new();
        kv.write_batch(vec![Put::new("x", "1"), Put::new("y", "2")]);
        assert!(kv.get(b"x").is_some());
        assert!(kv.get(b"y").is_some());
    }

    #[test]
    fn last_key_with_prefix_finds_greatest_suffix() {
        let kv = MemoryKv::new();
        kv.put(b"s:0000000000000001", b"v1");
        kv.put(b"s:0000000000000003", b"v3");
        kv.put(b"s:0000000000000002", b"v2");
        assert_eq!(
            kv.last_key_with_prefix(b"s:"),
            Some(b"s:0000000000000003".to_vec())
        );
    }

    #[test]
    fn missing_key_is_none_not_error() {
        let kv = MemoryKv::new();
        assert!(kv.get(b"missing").is_none());
    }
}
