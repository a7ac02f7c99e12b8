// SPDX-License-Identifier: Apache-2.0
//! Record wire format (§6).
//!
//! ```text
//! offset 0:  magic ("PTEV")             4 bytes
//! offset 4:  version                    2 bytes (u16 BE)
//! offset 6:  event_kind                 2 bytes (u16 BE)
//! offset 8:  sequence                   8 bytes (u64 BE)
//! offset 16: tick                       8 bytes (i64 BE)
//! offset 24: previous_hash_len, bytes   1 + N
//! ...        hash                        N (same width as previous_hash)
//! ...        payload (length-prefixed)   8 + M
//! ```

use tecto_codec::{canonical_encode, EventKindTag, TopologyEvent};
use tecto_ids::Hash;

use crate::error::ReadError;

const MAGIC: [u8; 4] = *b"PTEV";
const VERSION: u16 = 1;

/// A fully-framed on-the-wire record, ready to be written as a KV value.
#[derive(Debug, Clone)]
pub struct RecordBytes(pub Vec<u8>);

/// Encodes one record for storage.
#[must_use]
pub fn encode_record(
    sequence: u64,
    tick: i64,
    previous_hash: Hash,
    hash: Hash,
    payload: &TopologyEvent,
) -> RecordBytes {
    let encoded_payload = canonical_encode(payload);
    let mut out = Vec::with_capacity(64 + encoded_payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_be_bytes());
    out.extend_from_slice(&(payload.kind_tag() as u16).to_be_bytes());
    out.extend_from_slice(&sequence.to_be_bytes());
    out.extend_from_slice(&tick.to_be_bytes());
    out.push(previous_hash.len() as u8);
    out.extend_from_slice(&previous_hash);
    out.extend_from_slice(&hash);
    out.extend_from_slice(&(encoded_payload.len() as u64).to_be_bytes());
    out.extend_from_slice(&encoded_payload);
    RecordBytes(out)
}

/// A decoded record header plus its raw encoded payload bytes.
///
/// The payload is intentionally left as bytes here — reconstructing a typed
/// [`TopologyEvent`] from canonical bytes is a one-way hash input in this
/// engine, not a supported decode path (the log stores what the writer
/// supplied; it never needs to reverse the encoding, only re-verify it).
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    /// Event kind tag from the header.
    pub event_kind: EventKindTag,
    /// Sequence number from the header.
    pub sequence: u64,
    /// Simulation tick from the header.
    pub tick: i64,
    /// Previous-hash field as stored.
    pub previous_hash: Hash,
    /// Hash field as stored.
    pub hash: Hash,
    /// Raw canonically-encoded payload bytes.
    pub payload_bytes: Vec<u8>,
}

/// Decodes a stored record's framing, without verifying the chain (see
/// [`crate::log::EventLog::read`] for chain verification).
///
/// # Errors
/// Returns [`ReadError::InvalidMagic`] or [`ReadError::MalformedRecord`] if
/// `bytes` is truncated or does not begin with the expected magic.
pub fn decode_record(key: &[u8], bytes: &[u8]) -> Result<DecodedRecord, ReadError> {
    let malformed = |detail: &str| ReadError::MalformedRecord {
        key: key.to_vec(),
        detail: detail.to_string(),
    };

    if bytes.len() < 24 {
        return Err(malformed("record shorter than fixed header"));
    }
    if bytes[0..4] != MAGIC {
        return Err(ReadError::InvalidMagic { key: key.to_vec() });
    }
    let event_kind_raw = u16::from_be_bytes([bytes[6], bytes[7]]);
    let event_kind = EventKindTag::from_u16(event_kind_raw)
        .ok_or_else(|| malformed("unknown event_kind tag"))?;
    let sequence = u64::from_be_bytes(
        bytes[8..16]
            .try_into()
            .map_err(|_| malformed("truncated sequence field"))?,
    );
    let tick = i64::from_be_bytes(
        bytes[16..24]
            .try_into()
            .map_err(|_| malformed("truncated tick field"))?,
    );

    let mut cursor = 24usize;
    let prev_len = *bytes.get(cursor).ok_or_else(|| malformed("truncated previous_hash_len"))? as usize;
    cursor += 1;
    let previous_hash = read_hash(bytes, cursor, prev_len, &malformed)?;
    cursor += prev_len;
    let hash = read_hash(bytes, cursor, prev_len, &malformed)?;
    cursor += prev_len;

    let len_bytes = bytes
        .get(cursor..cursor + 8)
        .ok_or_else(|| malformed("truncated payload length"))?;
    let payload_len = u64::from_be_bytes(
        len_bytes
            .try_into()
            .map_err(|_| malformed("truncated payload length"))?,
    ) as usize;
    cursor += 8;
    let payload_bytes = bytes
        .get(cursor..cursor + payload_len)
        .ok_or_else(|| malformed("truncated payload body"))?
        .to_vec();

    Ok(DecodedRecord {
        event_kind,
        sequence,
        tick,
        previous_hash,
        hash,
        payload_bytes,
    })
}

fn read_hash(
    bytes: &[u8],
    offset: usize,
    len: usize,
    malformed: &impl Fn(&str) -> ReadError,
) -> Result<Hash, ReadError> {
    if len != 32 {
        return Err(malformed("unsupported hash width"));
    }
    let slice = bytes
        .get(offset..offset + len)
        .ok_or_else(|| malformed("truncated hash field"))?;
    let mut out = [0u8; 32];
    out.copy_from_slice(slice);
    Ok(out)
}
