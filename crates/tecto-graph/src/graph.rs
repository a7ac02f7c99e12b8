// SPDX-License-Identifier: Apache-2.0
//! Plate-adjacency graph derived from a [`PlateTopologyState`] (§4.6).

use tecto_codec::BoundaryKind;
use tecto_ids::{BoundaryId, PlateId};
use tecto_materializer::PlateTopologyState;

/// A plate node in the adjacency graph.
///
/// Present iff the plate is non-retired and participates in at least one
/// non-retired boundary; isolated plates carry no topological information
/// useful to a consumer of this graph and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Plate this node represents.
    pub plate_id: PlateId,
    /// Ids of adjacent plates, in ascending order with duplicates removed
    /// (two plates may share more than one boundary).
    pub neighbors: Vec<PlateId>,
}

/// A boundary edge in the adjacency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Boundary this edge represents.
    pub boundary_id: BoundaryId,
    /// Plate on the "left" side, per the winding of the source geometry.
    pub left: PlateId,
    /// Plate on the "right" side, per the winding of the source geometry.
    pub right: PlateId,
    /// Tectonic relationship this boundary represents.
    pub kind: BoundaryKind,
}

/// Plate-adjacency graph derived from a materialized topology state.
///
/// Nodes and edges are sorted by id, so two equal states always produce
/// structurally and order-equal graphs regardless of the order events were
/// folded in. The graph holds no reference back to the truth log: it is a
/// read-only projection, rebuilt from scratch whenever the underlying state
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateAdjacencyGraph {
    /// Plate nodes, in ascending [`PlateId`] order.
    pub nodes: Vec<GraphNode>,
    /// Boundary edges, in ascending [`BoundaryId`] order.
    pub edges: Vec<GraphEdge>,
}

impl PlateAdjacencyGraph {
    /// Derives the adjacency graph for `state`.
    #[must_use]
    pub fn build(state: &PlateTopologyState) -> Self {
        let mut edges: Vec<GraphEdge> = state
            .boundaries
            .values()
            .filter(|boundary| !boundary.retired)
            .map(|boundary| GraphEdge {
                boundary_id: boundary.boundary_id,
                left: boundary.left,
                right: boundary.right,
                kind: boundary.kind,
            })
            .collect();
        edges.sort_by_key(|edge| edge.boundary_id);

        let mut neighbors: std::collections::BTreeMap<PlateId, Vec<PlateId>> =
            std::collections::BTreeMap::new();
        for edge in &edges {
            neighbors.entry(edge.left).or_default().push(edge.right);
            neighbors.entry(edge.right).or_default().push(edge.left);
        }

        let nodes = state
            .plates
            .values()
            .filter(|plate| !plate.retired)
            .filter_map(|plate| {
                let mut plate_neighbors = neighbors.get(&plate.plate_id)?.clone();
                plate_neighbors.sort();
                plate_neighbors.dedup();
                Some(GraphNode {
                    plate_id: plate.plate_id,
                    neighbors: plate_neighbors,
                })
            })
            .collect();

        Self { nodes, edges }
    }
}
