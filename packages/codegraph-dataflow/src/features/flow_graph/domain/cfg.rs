//! Intraprocedural control flow graph
//!
//! Nodes are statements of one method plus its synthetic entry and exit.
//! Edges are typed so consumers (dead code detection) can tell which branch
//! of an `if`/`switch` an edge stands for.

use crate::shared::models::{MethodId, StmtId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CFGEdgeKind {
    /// Synthetic entry to first statement
    Entry,
    /// Sequential execution
    FallThrough,
    /// Unconditional jump
    Goto,
    /// Taken branch of `if`
    IfTrue,
    /// Not-taken branch of `if`
    IfFalse,
    /// `switch` case with its value
    SwitchCase(i32),
    SwitchDefault,
    /// `return` (or falling off the body) to the synthetic exit
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CFGEdge {
    pub kind: CFGEdgeKind,
    pub source: StmtId,
    pub target: StmtId,
}

#[derive(Debug, Clone)]
pub struct CFG {
    method: MethodId,
    entry: StmtId,
    exit: StmtId,
    /// Entry, body in index order, exit
    nodes: Vec<StmtId>,
    out_edges: FxHashMap<StmtId, Vec<CFGEdge>>,
    in_edges: FxHashMap<StmtId, Vec<CFGEdge>>,
}

impl CFG {
    pub fn new(method: MethodId, entry: StmtId, exit: StmtId, nodes: Vec<StmtId>) -> Self {
        Self {
            method,
            entry,
            exit,
            nodes,
            out_edges: FxHashMap::default(),
            in_edges: FxHashMap::default(),
        }
    }

    pub fn add_edge(&mut self, kind: CFGEdgeKind, source: StmtId, target: StmtId) {
        let edge = CFGEdge {
            kind,
            source,
            target,
        };
        self.out_edges.entry(source).or_default().push(edge);
        self.in_edges.entry(target).or_default().push(edge);
    }

    pub fn method(&self) -> MethodId {
        self.method
    }

    pub fn entry(&self) -> StmtId {
        self.entry
    }

    pub fn exit(&self) -> StmtId {
        self.exit
    }

    pub fn nodes(&self) -> &[StmtId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn out_edges(&self, node: StmtId) -> &[CFGEdge] {
        self.out_edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_edges(&self, node: StmtId) -> &[CFGEdge] {
        self.in_edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn succs(&self, node: StmtId) -> impl Iterator<Item = StmtId> + '_ {
        self.out_edges(node).iter().map(|e| e.target)
    }

    pub fn preds(&self, node: StmtId) -> impl Iterator<Item = StmtId> + '_ {
        self.in_edges(node).iter().map(|e| e.source)
    }

    pub fn num_edges(&self) -> usize {
        self.out_edges.values().map(Vec::len).sum()
    }
}
