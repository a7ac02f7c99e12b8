// SPDX-License-Identifier: Apache-2.0
//! Optional CBOR export of a [`PlateAdjacencyGraph`], for downstream
//! visualization tooling. Not used internally by this crate or by
//! `tecto-partition`; the canonical in-process representation is
//! [`PlateAdjacencyGraph`] itself.

use serde::Serialize;

use crate::graph::PlateAdjacencyGraph;

#[derive(Serialize)]
struct CborNode {
    plate_id: [u8; 16],
    neighbors: Vec<[u8; 16]>,
}

#[derive(Serialize)]
struct CborEdge {
    boundary_id: [u8; 16],
    left: [u8; 16],
    right: [u8; 16],
    kind: u8,
}

#[derive(Serialize)]
struct CborGraph {
    nodes: Vec<CborNode>,
    edges: Vec<CborEdge>,
}

/// Errors returned while serializing a graph to CBOR.
#[derive(Debug, thiserror::Error)]
pub enum CborExportError {
    /// The underlying `ciborium` writer failed.
    #[error("cbor serialization failed: {0}")]
    Serialize(#[from] ciborium::ser::Error<std::io::Error>),
}

impl PlateAdjacencyGraph {
    /// Serializes this graph as CBOR, matching `echo-graph`'s canonical
    /// export shape (length-ordered, ids as raw byte arrays).
    ///
    /// # Errors
    /// Returns [`CborExportError`] if the underlying encoder fails.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CborExportError> {
        let shadow = CborGraph {
            nodes: self
                .nodes
                .iter()
                .map(|node| CborNode {
                    plate_id: *node.plate_id.as_bytes(),
                    neighbors: node.neighbors.iter().map(|id| *id.as_bytes()).collect(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|edge| CborEdge {
                    boundary_id: *edge.boundary_id.as_bytes(),
                    left: *edge.left.as_bytes(),
                    right: *edge.right.as_bytes(),
                    kind: edge.kind.tag(),
                })
                .collect(),
        };
        let mut out = Vec::new();
        ciborium::ser::into_writer(&shadow, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use tecto_codec::BoundaryKind;
    use tecto_ids::{BoundaryId, PlateId};

    #[test]
    fn empty_graph_round_trips_through_cbor() {
        let graph = PlateAdjacencyGraph {
            nodes: vec![],
            edges: vec![],
        };
        let bytes = graph.to_cbor().unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn populated_graph_encodes_without_error() {
        let a = PlateId::from_u128(1);
        let b = PlateId::from_u128(2);
        let boundary = BoundaryId::from_u128(1);
        let graph = PlateAdjacencyGraph {
            nodes: vec![
                GraphNode {
                    plate_id: a,
                    neighbors: vec![b],
                },
                GraphNode {
                    plate_id: b,
                    neighbors: vec![a],
                },
            ],
            edges: vec![GraphEdge {
                boundary_id: boundary,
                left: a,
                right: b,
                kind: BoundaryKind::Transform,
            }],
        };
        let bytes = graph.to_cbor().unwrap();
        assert!(!bytes.is_empty());
    }
}
