//! Pointer flow graph
//!
//! An edge `s → t` means `pts(t) ⊇ pts(s)`. Backed by a petgraph
//! `DiGraphMap`, keyed directly by [`PointerId`].

use crate::features::points_to::domain::PointerId;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

#[derive(Debug, Default)]
pub struct PointerFlowGraph {
    graph: DiGraphMap<PointerId, ()>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the edge is new
    pub fn add_edge(&mut self, source: PointerId, target: PointerId) -> bool {
        if self.graph.contains_edge(source, target) {
            return false;
        }
        self.graph.add_edge(source, target, ());
        true
    }

    pub fn succs(&self, pointer: PointerId) -> Vec<PointerId> {
        if !self.graph.contains_node(pointer) {
            return Vec::new();
        }
        self.graph.neighbors_directed(pointer, Direction::Outgoing).collect()
    }

    pub fn has_edge(&self, source: PointerId, target: PointerId) -> bool {
        self.graph.contains_edge(source, target)
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }
}
