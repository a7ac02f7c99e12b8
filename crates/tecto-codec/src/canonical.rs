// SPDX-License-Identifier: Apache-2.0
//! Canonical byte encoding/decoding of events (§4.2).
//!
//! Every encoder here is hand-rolled fixed-width/length-prefixed framing,
//! deliberately not routed through a general-purpose serializer whose field
//! order or float formatting could vary across versions — the same
//! discipline this style of engine applies to its own chain-hash inputs.
//! Floating point numbers are encoded as big-endian IEEE-754 bit patterns.
//! Fields with undefined order (a junction's boundary set) are sorted by
//! their binary id before encoding.
//!
//! Decoding is the exact inverse of encoding and is used by the
//! materializer to recover typed events from a log that persists only
//! bytes; it plays no role in hash computation itself.

use tecto_geom::{Polyline3, SurfacePoint};
use tecto_ids::{BoundaryId, JunctionId, PlateId};

use crate::error::CodecError;
use crate::event::{BoundaryKind, EventKindTag, TopologyEvent};

fn put_bytes16(out: &mut Vec<u8>, id: &[u8; 16]) {
    out.extend_from_slice(id);
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_bits().to_be_bytes());
}

fn put_string(out: &mut Vec<u8>, value: &str) {
    put_u64(out, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}

fn put_point(out: &mut Vec<u8>, point: SurfacePoint) {
    put_f64(out, point.x);
    put_f64(out, point.y);
    put_f64(out, point.z);
}

fn put_polyline(out: &mut Vec<u8>, line: &Polyline3) {
    put_u64(out, line.points().len() as u64);
    for point in line.points() {
        put_point(out, *point);
    }
}

fn put_boundary_kind(out: &mut Vec<u8>, kind: BoundaryKind) {
    out.push(kind.tag());
}

/// Sorts a copy of `ids` by binary id, per the "fields with undefined order
/// are serialized sorted by their binary id" rule (§4.2).
fn sorted_ids(ids: &[BoundaryId]) -> Vec<BoundaryId> {
    let mut sorted = ids.to_vec();
    sorted.sort();
    sorted
}

fn put_boundary_ids_sorted(out: &mut Vec<u8>, ids: &[BoundaryId]) {
    let sorted = sorted_ids(ids);
    put_u64(out, sorted.len() as u64);
    for id in &sorted {
        put_bytes16(out, id.as_bytes());
    }
}

/// Produces the canonical byte encoding of an event's payload, excluding
/// framing fields (`sequence`, `tick`, `previous_hash`, `hash`).
///
/// Two equal [`TopologyEvent`] values always produce identical bytes,
/// independent of platform or run.
#[must_use]
pub fn canonical_encode(event: &TopologyEvent) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(event.kind_tag() as u16).to_be_bytes());
    match event {
        TopologyEvent::PlateCreated { plate_id } => {
            put_bytes16(&mut out, plate_id.as_bytes());
        }
        TopologyEvent::PlateRetired { plate_id, reason } => {
            put_bytes16(&mut out, plate_id.as_bytes());
            put_string(&mut out, reason);
        }
        TopologyEvent::BoundaryCreated {
            boundary_id,
            left,
            right,
            kind,
            geometry,
        } => {
            put_bytes16(&mut out, boundary_id.as_bytes());
            put_bytes16(&mut out, left.as_bytes());
            put_bytes16(&mut out, right.as_bytes());
            put_boundary_kind(&mut out, *kind);
            put_polyline(&mut out, geometry);
        }
        TopologyEvent::BoundaryTypeChanged {
            boundary_id,
            old_kind,
            new_kind,
        } => {
            put_bytes16(&mut out, boundary_id.as_bytes());
            put_boundary_kind(&mut out, *old_kind);
            put_boundary_kind(&mut out, *new_kind);
        }
        TopologyEvent::BoundaryGeometryUpdated {
            boundary_id,
            new_geometry,
        } => {
            put_bytes16(&mut out, boundary_id.as_bytes());
            put_polyline(&mut out, new_geometry);
        }
        TopologyEvent::BoundaryRetired { boundary_id, reason } => {
            put_bytes16(&mut out, boundary_id.as_bytes());
            put_string(&mut out, reason);
        }
        TopologyEvent::JunctionCreated {
            junction_id,
            boundary_ids,
            location,
        } => {
            put_bytes16(&mut out, junction_id.as_bytes());
            put_boundary_ids_sorted(&mut out, boundary_ids);
            put_point(&mut out, *location);
        }
        TopologyEvent::JunctionUpdated {
            junction_id,
            new_boundary_ids,
            new_location,
        } => {
            put_bytes16(&mut out, junction_id.as_bytes());
            put_boundary_ids_sorted(&mut out, new_boundary_ids);
            match new_location {
                None => out.push(0),
                Some(point) => {
                    out.push(1);
                    put_point(&mut out, *point);
                }
            }
        }
        TopologyEvent::JunctionRetired { junction_id, reason } => {
            put_bytes16(&mut out, junction_id.as_bytes());
            put_string(&mut out, reason);
        }
    }
    out
}

/// A cursor over canonically-encoded bytes, used only by [`canonical_decode`].
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(len).ok_or(CodecError::Truncated { field })?;
        let slice = self.bytes.get(self.pos..end).ok_or(CodecError::Truncated { field })?;
        self.pos = end;
        Ok(slice)
    }

    fn bytes16(&mut self, field: &'static str) -> Result<[u8; 16], CodecError> {
        let slice = self.take(16, field)?;
        let mut out = [0u8; 16];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn u64(&mut self, field: &'static str) -> Result<u64, CodecError> {
        let slice = self.take(8, field)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(slice);
        Ok(u64::from_be_bytes(buf))
    }

    fn f64(&mut self, field: &'static str) -> Result<f64, CodecError> {
        let slice = self.take(8, field)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(slice);
        Ok(f64::from_bits(u64::from_be_bytes(buf)))
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        let slice = self.take(1, field)?;
        Ok(slice[0])
    }

    fn string(&mut self, field: &'static str) -> Result<String, CodecError> {
        let len = self.u64(field)? as usize;
        let slice = self.take(len, field)?;
        String::from_utf8(slice.to_vec()).map_err(|_| CodecError::InvalidUtf8 { field })
    }

    fn point(&mut self, field: &'static str) -> Result<SurfacePoint, CodecError> {
        Ok(SurfacePoint::new(
            self.f64(field)?,
            self.f64(field)?,
            self.f64(field)?,
        ))
    }

    fn polyline(&mut self, field: &'static str) -> Result<Polyline3, CodecError> {
        let count = self.u64(field)? as usize;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(self.point(field)?);
        }
        Ok(Polyline3::new(points))
    }

    fn boundary_kind(&mut self, field: &'static str) -> Result<BoundaryKind, CodecError> {
        let tag = self.u8(field)?;
        BoundaryKind::from_tag(tag).ok_or(CodecError::UnknownBoundaryKind { tag })
    }

    fn boundary_ids(&mut self, field: &'static str) -> Result<Vec<BoundaryId>, CodecError> {
        let count = self.u64(field)? as usize;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(BoundaryId(self.bytes16(field)?));
        }
        Ok(ids)
    }

    fn finish(self) -> Result<(), CodecError> {
        let extra = self.bytes.len() - self.pos;
        if extra == 0 {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes { extra })
        }
    }
}

/// Decodes canonically-encoded bytes back into a [`TopologyEvent`].
///
/// This is the exact inverse of [`canonical_encode`]: for every `event`,
/// `canonical_decode(&canonical_encode(event)) == Ok(event)`.
///
/// # Errors
/// Returns a [`CodecError`] if `bytes` is truncated, carries an unknown
/// kind/boundary-kind tag, contains invalid UTF-8 in a string field, or has
/// trailing bytes after a complete event has been read.
pub fn canonical_decode(bytes: &[u8]) -> Result<TopologyEvent, CodecError> {
    let mut reader = Reader::new(bytes);
    let tag_bytes = reader.take(2, "kind_tag")?;
    let tag = u16::from_be_bytes([tag_bytes[0], tag_bytes[1]]);
    let kind = EventKindTag::from_u16(tag).ok_or(CodecError::UnknownEventKind { tag })?;

    let event = match kind {
        EventKindTag::PlateCreated => TopologyEvent::PlateCreated {
            plate_id: PlateId(reader.bytes16("plate_id")?),
        },
        EventKindTag::PlateRetired => TopologyEvent::PlateRetired {
            plate_id: PlateId(reader.bytes16("plate_id")?),
            reason: reader.string("reason")?,
        },
        EventKindTag::BoundaryCreated => TopologyEvent::BoundaryCreated {
            boundary_id: BoundaryId(reader.bytes16("boundary_id")?),
            left: PlateId(reader.bytes16("left")?),
            right: PlateId(reader.bytes16("right")?),
            kind: reader.boundary_kind("kind")?,
            geometry: reader.polyline("geometry")?,
        },
        EventKindTag::BoundaryTypeChanged => TopologyEvent::BoundaryTypeChanged {
            boundary_id: BoundaryId(reader.bytes16("boundary_id")?),
            old_kind: reader.boundary_kind("old_kind")?,
            new_kind: reader.boundary_kind("new_kind")?,
        },
        EventKindTag::BoundaryGeometryUpdated => TopologyEvent::BoundaryGeometryUpdated {
            boundary_id: BoundaryId(reader.bytes16("boundary_id")?),
            new_geometry: reader.polyline("new_geometry")?,
        },
        EventKindTag::BoundaryRetired => TopologyEvent::BoundaryRetired {
            boundary_id: BoundaryId(reader.bytes16("boundary_id")?),
            reason: reader.string("reason")?,
        },
        EventKindTag::JunctionCreated => TopologyEvent::JunctionCreated {
            junction_id: JunctionId(reader.bytes16("junction_id")?),
            boundary_ids: reader.boundary_ids("boundary_ids")?,
            location: reader.point("location")?,
        },
        EventKindTag::JunctionUpdated => {
            let junction_id = JunctionId(reader.bytes16("junction_id")?);
            let new_boundary_ids = reader.boundary_ids("new_boundary_ids")?;
            let has_location = reader.u8("location_tag")?;
            let new_location = if has_location == 0 {
                None
            } else {
                Some(reader.point("new_location")?)
            };
            TopologyEvent::JunctionUpdated {
                junction_id,
                new_boundary_ids,
                new_location,
            }
        }
        EventKindTag::JunctionRetired => TopologyEvent::JunctionRetired {
            junction_id: JunctionId(reader.bytes16("junction_id")?),
            reason: reader.string("reason")?,
        },
    };

    reader.finish()?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tecto_ids::PlateId;

    #[test]
    fn encoding_is_deterministic() {
        let event = TopologyEvent::PlateCreated {
            plate_id: PlateId::from_u128(7),
        };
        assert_eq!(canonical_encode(&event), canonical_encode(&event));
    }

    #[test]
    fn junction_boundary_set_is_order_independent() {
        let a = BoundaryId::from_u128(1);
        let b = BoundaryId::from_u128(2);
        let c = BoundaryId::from_u128(3);
        let loc = SurfacePoint::new(1.0, 0.0, 0.0);
        let e1 = TopologyEvent::JunctionCreated {
            junction_id: tecto_ids::JunctionId::from_u128(9),
            boundary_ids: vec![a, b, c],
            location: loc,
        };
        let e2 = TopologyEvent::JunctionCreated {
            junction_id: tecto_ids::JunctionId::from_u128(9),
            boundary_ids: vec![c, a, b],
            location: loc,
        };
        assert_eq!(canonical_encode(&e1), canonical_encode(&e2));
    }

    #[test]
    fn different_kinds_never_collide_on_empty_payload_prefix() {
        let plate_created = TopologyEvent::PlateCreated {
            plate_id: PlateId::from_u128(1),
        };
        let encoded = canonical_encode(&plate_created);
        assert_eq!(&encoded[0..2], &1u16.to_be_bytes());
    }

    fn roundtrip(event: &TopologyEvent) {
        let encoded = canonical_encode(event);
        let decoded = canonical_decode(&encoded).expect("decode should succeed");
        assert_eq!(&decoded, event);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn every_event_kind_round_trips() {
        let plate = PlateId::from_u128(1);
        let other = PlateId::from_u128(2);
        let boundary = BoundaryId::from_u128(10);
        let junction = JunctionId::from_u128(100);
        let geometry = Polyline3::new(vec![
            SurfacePoint::new(1.0, 0.0, 0.0),
            SurfacePoint::new(0.0, 1.0, 0.0),
        ]);
        let location = SurfacePoint::new(0.0, 0.0, 1.0);

        roundtrip(&TopologyEvent::PlateCreated { plate_id: plate });
        roundtrip(&TopologyEvent::PlateRetired {
            plate_id: plate,
            reason: "exhausted".into(),
        });
        roundtrip(&TopologyEvent::BoundaryCreated {
            boundary_id: boundary,
            left: plate,
            right: other,
            kind: BoundaryKind::Convergent,
            geometry: geometry.clone(),
        });
        roundtrip(&TopologyEvent::BoundaryTypeChanged {
            boundary_id: boundary,
            old_kind: BoundaryKind::Convergent,
            new_kind: BoundaryKind::Transform,
        });
        roundtrip(&TopologyEvent::BoundaryGeometryUpdated {
            boundary_id: boundary,
            new_geometry: geometry,
        });
        roundtrip(&TopologyEvent::BoundaryRetired {
            boundary_id: boundary,
            reason: "subducted".into(),
        });
        roundtrip(&TopologyEvent::JunctionCreated {
            junction_id: junction,
            boundary_ids: vec![boundary],
            location,
        });
        roundtrip(&TopologyEvent::JunctionUpdated {
            junction_id: junction,
            new_boundary_ids: vec![boundary],
            new_location: Some(location),
        });
        roundtrip(&TopologyEvent::JunctionUpdated {
            junction_id: junction,
            new_boundary_ids: vec![],
            new_location: None,
        });
        roundtrip(&TopologyEvent::JunctionRetired {
            junction_id: junction,
            reason: "abandoned".into(),
        });
    }

    #[test]
    fn truncated_bytes_are_rejected_not_panicking() {
        let event = TopologyEvent::PlateCreated {
            plate_id: PlateId::from_u128(1),
        };
        let mut encoded = canonical_encode(&event);
        encoded.truncate(encoded.len() - 1);
        assert!(canonical_decode(&encoded).is_err());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let event = TopologyEvent::PlateCreated {
            plate_id: PlateId::from_u128(1),
        };
        let mut encoded = canonical_encode(&event);
        encoded.push(0xFF);
        assert!(matches!(
            canonical_decode(&encoded),
            Err(CodecError::TrailingBytes { .. })
        ));
    }
}
