//! Interprocedural control flow graph
//!
//! Per-method CFGs of the reachable methods, stitched together at call
//! sites:
//!
//! ```text
//!   call ──Call──▶ callee.entry
//!    │                  ⋮
//!    CallToReturn   callee.exit
//!    ▼                  │
//!   return site ◀──Return┘
//! ```

use super::cfg::CFG;
use crate::shared::models::{MethodId, StmtId, VarId};
use rustc_hash::FxHashMap;

/// ICFG edge kind with the linkage the edge transfer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ICFGEdgeKind {
    /// Intraprocedural edge not leaving a call site
    Normal,
    /// Call site to its return site, bypassing the callee
    CallToReturn,
    /// Call site to callee entry
    Call {
        callee: MethodId,
        /// Actual arguments at the call site
        args: Vec<VarId>,
        /// Formal parameters of the callee
        params: Vec<VarId>,
    },
    /// Callee exit to return site
    Return {
        call_site: StmtId,
        callee: MethodId,
        /// Variables returned by the callee
        return_vars: Vec<VarId>,
        /// Result variable at the call site
        result: Option<VarId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICFGEdge {
    pub kind: ICFGEdgeKind,
    pub source: StmtId,
    pub target: StmtId,
}

#[derive(Debug, Clone)]
pub struct ICFG {
    pub(crate) entry_methods: Vec<MethodId>,
    pub(crate) cfgs: FxHashMap<MethodId, CFG>,
    /// Reachable methods in discovery order
    pub(crate) methods: Vec<MethodId>,
    pub(crate) nodes: Vec<StmtId>,
    pub(crate) edges: Vec<ICFGEdge>,
    pub(crate) out_edges: FxHashMap<StmtId, Vec<usize>>,
    pub(crate) in_edges: FxHashMap<StmtId, Vec<usize>>,
    pub(crate) callees: FxHashMap<StmtId, Vec<MethodId>>,
    pub(crate) node_method: FxHashMap<StmtId, MethodId>,
}

impl ICFG {
    pub fn entry_methods(&self) -> &[MethodId] {
        &self.entry_methods
    }

    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    pub fn nodes(&self) -> &[StmtId] {
        &self.nodes
    }

    pub fn cfg(&self, method: MethodId) -> Option<&CFG> {
        self.cfgs.get(&method)
    }

    pub fn method_of(&self, node: StmtId) -> Option<MethodId> {
        self.node_method.get(&node).copied()
    }

    pub fn entry_of(&self, method: MethodId) -> Option<StmtId> {
        self.cfgs.get(&method).map(CFG::entry)
    }

    pub fn exit_of(&self, method: MethodId) -> Option<StmtId> {
        self.cfgs.get(&method).map(CFG::exit)
    }

    pub fn out_edges(&self, node: StmtId) -> impl Iterator<Item = &ICFGEdge> + '_ {
        self.out_edges
            .get(&node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    pub fn in_edges(&self, node: StmtId) -> impl Iterator<Item = &ICFGEdge> + '_ {
        self.in_edges
            .get(&node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    pub fn succs(&self, node: StmtId) -> impl Iterator<Item = StmtId> + '_ {
        self.out_edges(node).map(|e| e.target)
    }

    /// Resolved targets of a call site (empty if none were discovered)
    pub fn callees_of(&self, call_site: StmtId) -> &[MethodId] {
        self.callees
            .get(&call_site)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[ICFGEdge] {
        &self.edges
    }
}
