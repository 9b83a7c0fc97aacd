//! Context-sensitive call graph
//!
//! Grows monotonically while the pointer analysis runs: methods become
//! reachable and call edges get discovered as receiver objects flow in.

use super::cs_element::{CsCallSiteId, CsMethodId};
use crate::shared::models::CallKind;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub kind: CallKind,
    pub call_site: CsCallSiteId,
    pub callee: CsMethodId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsCallGraph {
    entries: Vec<CsMethodId>,
    reachable: FxHashSet<CsMethodId>,
    /// Discovery order
    reachable_order: Vec<CsMethodId>,
    edge_set: FxHashSet<CallEdge>,
    edges: Vec<CallEdge>,
    callees: FxHashMap<CsCallSiteId, Vec<CsMethodId>>,
}

impl CsCallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, method: CsMethodId) {
        if !self.entries.contains(&method) {
            self.entries.push(method);
        }
    }

    pub fn entries(&self) -> &[CsMethodId] {
        &self.entries
    }

    /// Returns whether `method` was not reachable before
    pub fn add_reachable(&mut self, method: CsMethodId) -> bool {
        if self.reachable.insert(method) {
            self.reachable_order.push(method);
            true
        } else {
            false
        }
    }

    pub fn contains_method(&self, method: CsMethodId) -> bool {
        self.reachable.contains(&method)
    }

    pub fn reachable_methods(&self) -> &[CsMethodId] {
        &self.reachable_order
    }

    /// Returns whether the edge is new
    pub fn add_edge(&mut self, edge: CallEdge) -> bool {
        if !self.edge_set.insert(edge) {
            return false;
        }
        self.edges.push(edge);
        self.callees.entry(edge.call_site).or_default().push(edge.callee);
        true
    }

    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    pub fn callees_of(&self, call_site: CsCallSiteId) -> &[CsMethodId] {
        self.callees.get(&call_site).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_reachable(&self) -> usize {
        self.reachable_order.len()
    }
}
