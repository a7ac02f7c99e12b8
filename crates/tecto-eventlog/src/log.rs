// SPDX-License-Identifier: Apache-2.0
//! The event log itself (§4.3).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tecto_codec::{
    canonical_decode, canonical_encode, compute_event_hash, compute_event_id,
    genesis_previous_hash, verify_event_hash, TopologyEvent,
};
use tecto_ids::{CanonicalTick, Hash, TruthStreamIdentity};
use tecto_kv::{OrderedKv, Put};

use crate::error::{AppendError, ReadError};
use crate::keys::{event_key, stream_prefix};
use crate::wire::{decode_record, encode_record};

/// One logged event, framing fields populated by the log itself (§3.4).
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    /// Content-derived event identifier.
    pub event_id: Hash,
    /// Sequence number, unique and strictly increasing within the stream.
    pub sequence: u64,
    /// Simulation tick this event occurred at.
    pub tick: CanonicalTick,
    /// Identity of the stream this event belongs to.
    pub stream_identity: TruthStreamIdentity,
    /// Hash of the preceding event in the stream (empty for `sequence == 0`).
    pub previous_hash: Hash,
    /// This event's own hash.
    pub hash: Hash,
    /// The event payload.
    pub payload: TopologyEvent,
}

/// One event submitted for appending, before sequence/hash assignment.
pub struct PendingEvent {
    /// Stream this event is declared against; must equal the `stream`
    /// argument of the [`EventLog::append`] call it is submitted in.
    pub declared_stream: TruthStreamIdentity,
    /// Simulation tick this event occurred at.
    pub tick: CanonicalTick,
    /// The event payload.
    pub payload: TopologyEvent,
}

/// An append-only, hash-chained event log over an [`OrderedKv`] substrate.
pub struct EventLog<K: OrderedKv> {
    kv: Arc<K>,
    /// One lock per stream, taken for the whole read-last-sequence-then-write
    /// critical section of [`Self::append`] so concurrent appends to the
    /// same stream serialize instead of racing on `last_sequence` (§5).
    stream_locks: Mutex<BTreeMap<Vec<u8>, Arc<Mutex<()>>>>,
}

impl<K: OrderedKv> EventLog<K> {
    /// Wraps an [`OrderedKv`] store as an event log.
    pub fn new(kv: Arc<K>) -> Self {
        Self {
            kv,
            stream_locks: Mutex::new(BTreeMap::new()),
        }
    }

    fn lock_for(&self, stream: &TruthStreamIdentity) -> Arc<Mutex<()>> {
        let mut locks = self
            .stream_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            locks
                .entry(stream_prefix(stream))
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Returns the underlying store, so a caller can open a second logical
    /// namespace (e.g. a snapshot store) over the same substrate.
    #[must_use]
    pub fn kv(&self) -> Arc<K> {
        Arc::clone(&self.kv)
    }

    /// Returns the greatest sequence number stored for `stream`, or `None`
    /// if the stream is empty.
    #[must_use]
    pub fn last_sequence(&self, stream: &TruthStreamIdentity) -> Option<u64> {
        let prefix = stream_prefix(stream);
        let key = self.kv.last_key_with_prefix(&prefix)?;
        let suffix = key.get(prefix.len()..)?;
        let bytes: [u8; 8] = suffix.try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    /// Appends `events` to `stream`, atomically.
    ///
    /// The log computes every `previous_hash`/`hash` itself; [`PendingEvent`]
    /// carries no hash fields at all, so there is no caller-supplied hash to
    /// overwrite or trust. The whole read-last-sequence-then-write sequence
    /// is serialized per stream (§5): concurrent appends to the same stream
    /// queue up behind [`Self::lock_for`]; appends to different streams
    /// proceed independently.
    ///
    /// # Errors
    /// Returns [`AppendError::StreamIdentityMismatch`] if any event declares
    /// a stream other than `stream`. Returns [`AppendError::DuplicateSequence`]
    /// if a computed sequence number is already occupied in the store.
    /// [`AppendError::NonMonotonicSequence`] is reserved for a caller-visible
    /// gap between the stream's current length and a pre-assigned sequence;
    /// this log always assigns sequences itself, so the variant exists for
    /// future callers that pre-assign one. The store is left unchanged on
    /// error.
    #[tracing::instrument(skip(self, events), fields(stream = %stream))]
    pub fn append(
        &self,
        stream: &TruthStreamIdentity,
        events: Vec<PendingEvent>,
    ) -> Result<Vec<LoggedEvent>, AppendError> {
        let lock = self.lock_for(stream);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        for pending in &events {
            if pending.declared_stream != *stream {
                return Err(AppendError::StreamIdentityMismatch);
            }
        }

        let next_sequence = self.last_sequence(stream).map_or(0, |s| s + 1);
        let mut previous_hash = if next_sequence == 0 {
            genesis_previous_hash()
        } else {
            self.hash_at(stream, next_sequence - 1)
                .unwrap_or_else(genesis_previous_hash)
        };

        let mut logged = Vec::with_capacity(events.len());
        let mut batch = Vec::with_capacity(events.len());
        for (offset, pending) in events.into_iter().enumerate() {
            let sequence = next_sequence + offset as u64;
            let key = event_key(stream, sequence);
            if self.kv.get(&key).is_some() {
                return Err(AppendError::DuplicateSequence { sequence });
            }
            let encoded = canonical_encode(&pending.payload);
            let hash = compute_event_hash(previous_hash, &encoded);
            let event_id = compute_event_id(stream, sequence, &encoded);
            let record = encode_record(sequence, pending.tick.value(), previous_hash, hash, &pending.payload);
            batch.push(Put::new(key, record.0));
            logged.push(LoggedEvent {
                event_id,
                sequence,
                tick: pending.tick,
                stream_identity: stream.clone(),
                previous_hash,
                hash,
                payload: pending.payload,
            });
            previous_hash = hash;
        }

        self.kv.write_batch(batch);
        tracing::debug!(appended = logged.len(), "appended events");
        Ok(logged)
    }

    fn hash_at(&self, stream: &TruthStreamIdentity, sequence: u64) -> Option<Hash> {
        let key = event_key(stream, sequence);
        let bytes = self.kv.get(&key)?;
        let decoded = decode_record(&key, &bytes).ok()?;
        Some(decoded.hash)
    }

    /// Reads every event in `stream` from `from_sequence` onward, verifying
    /// the hash chain as it goes.
    ///
    /// The returned vector contains every event that verified successfully
    /// up to (and not including) the first failure; on chain-integrity or
    /// payload-decode failure the error carries the offending sequence
    /// number. A read that fails partway still yields the events that
    /// verified before the failure.
    #[tracing::instrument(skip(self), fields(stream = %stream, from_sequence))]
    pub fn read(
        &self,
        stream: &TruthStreamIdentity,
        from_sequence: u64,
    ) -> (Vec<LoggedEvent>, Option<ReadError>) {
        let prefix = stream_prefix(stream);
        let rows = self.kv.scan_prefix(&prefix);
        let mut events = Vec::new();
        let mut expected_previous_hash = if from_sequence == 0 {
            genesis_previous_hash()
        } else {
            // Re-derive the expected link by reading the record immediately
            // before `from_sequence`, if present.
            match self.hash_at(stream, from_sequence.saturating_sub(1)) {
                Some(hash) => hash,
                None => genesis_previous_hash(),
            }
        };

        for (key, bytes) in rows {
            let decoded = match decode_record(&key, &bytes) {
                Ok(decoded) => decoded,
                Err(err) => return (events, Some(err)),
            };
            if decoded.sequence < from_sequence {
                continue;
            }
            if decoded.previous_hash != expected_previous_hash {
                return (
                    events,
                    Some(ReadError::ChainIntegrityError {
                        sequence: decoded.sequence,
                    }),
                );
            }
            if !verify_event_hash(decoded.previous_hash, &decoded.payload_bytes, decoded.hash) {
                return (
                    events,
                    Some(ReadError::ChainIntegrityError {
                        sequence: decoded.sequence,
                    }),
                );
            }
            let payload = match canonical_decode(&decoded.payload_bytes) {
                Ok(payload) => payload,
                Err(source) => {
                    return (
                        events,
                        Some(ReadError::PayloadDecodeError {
                            sequence: decoded.sequence,
                            source,
                        }),
                    )
                }
            };
            let event_id = compute_event_id(stream, decoded.sequence, &decoded.payload_bytes);
            events.push(LoggedEvent {
                event_id,
                sequence: decoded.sequence,
                tick: CanonicalTick(decoded.tick),
                stream_identity: stream.clone(),
                previous_hash: decoded.previous_hash,
                hash: decoded.hash,
                payload,
            });
            expected_previous_hash = decoded.hash;
        }
        (events, None)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tecto_ids::PlateId;

    fn identity(model: &str) -> TruthStreamIdentity {
        TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", model)
    }

    fn plate_created(stream: &TruthStreamIdentity, id: u128) -> PendingEvent {
        PendingEvent {
            declared_stream: stream.clone(),
            tick: CanonicalTick(0),
            payload: TopologyEvent::PlateCreated {
                plate_id: PlateId::from_u128(id),
            },
        }
    }

    #[test]
    fn an_event_declaring_a_different_stream_is_rejected() {
        let log = EventLog::new(Arc::new(tecto_kv::MemoryKv::new()));
        let stream = identity("m1");
        let other = identity("m2");
        let err = log
            .append(&stream, vec![plate_created(&other, 1)])
            .expect_err("mismatched stream must be rejected");
        assert_eq!(err, AppendError::StreamIdentityMismatch);
        assert_eq!(log.last_sequence(&stream), None);
    }

    #[test]
    fn sequential_appends_to_the_same_stream_extend_contiguously() {
        let log = EventLog::new(Arc::new(tecto_kv::MemoryKv::new()));
        let stream = identity("m1");
        log.append(&stream, vec![plate_created(&stream, 1)]).expect("first append");
        log.append(&stream, vec![plate_created(&stream, 2)]).expect("second append");
        assert_eq!(log.last_sequence(&stream), Some(1));
    }

    #[test]
    fn appends_to_different_streams_do_not_interfere() {
        let log = EventLog::new(Arc::new(tecto_kv::MemoryKv::new()));
        let a = identity("m1");
        let b = identity("m2");
        log.append(&a, vec![plate_created(&a, 1)]).expect("append to a");
        assert_eq!(log.last_sequence(&b), None);
        log.append(&b, vec![plate_created(&b, 1)]).expect("append to b");
        assert_eq!(log.last_sequence(&a), Some(0));
        assert_eq!(log.last_sequence(&b), Some(0));
    }
}
