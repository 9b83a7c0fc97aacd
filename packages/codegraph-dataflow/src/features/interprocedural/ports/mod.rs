//! Ports (Interfaces) for interprocedural dataflow analysis
//!
//! Facts flow along ICFG edges, and each edge kind has its own transfer:
//! - **Normal**: intraprocedural flow
//! - **CallToReturn**: caller-local facts that survive the call
//! - **Call**: arguments bound to callee parameters
//! - **Return**: returned values bound to the call's result variable

use crate::errors::Result;
use crate::features::data_flow::domain::DataflowResult;
use crate::features::flow_graph::{ICFGEdge, ICFGEdgeKind};
use crate::shared::models::{MethodId, Stmt, StmtId};
use std::fmt::Debug;

/// What the solver lends a node transfer: read access to the facts of
/// other nodes, and a way to schedule them again.
pub struct InterContext<'r, F> {
    result: &'r DataflowResult<F>,
    pending: Vec<StmtId>,
}

impl<'r, F> InterContext<'r, F> {
    pub fn new(result: &'r DataflowResult<F>) -> Self {
        Self {
            result,
            pending: Vec::new(),
        }
    }

    pub fn in_fact(&self, node: StmtId) -> Option<&F> {
        self.result.in_fact(node)
    }

    pub fn out_fact(&self, node: StmtId) -> Option<&F> {
        self.result.out_fact(node)
    }

    /// Ask the solver to revisit `node`
    pub fn enqueue(&mut self, node: StmtId) {
        self.pending.push(node);
    }

    pub fn into_pending(self) -> Vec<StmtId> {
        self.pending
    }
}

/// A monotone dataflow problem over the ICFG
pub trait InterDataflowAnalysis {
    type Fact: Clone + PartialEq + Debug;

    fn name(&self) -> &'static str;

    fn is_forward(&self) -> bool;

    /// OUT fact of the entry node of entry method `method`
    fn new_boundary_fact(&self, method: MethodId) -> Self::Fact;

    fn new_initial_fact(&self) -> Self::Fact;

    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// Transfer of an invocation node; the callee's effect arrives over
    /// the Return edge, so this is usually the identity.
    fn transfer_call_node(&self, stmt: &Stmt, in_fact: &Self::Fact, out_fact: &mut Self::Fact) -> Result<bool>;

    fn transfer_non_call_node(
        &self,
        stmt: &Stmt,
        in_fact: &Self::Fact,
        out_fact: &mut Self::Fact,
        ctx: &mut InterContext<'_, Self::Fact>,
    ) -> Result<bool>;

    fn transfer_normal_edge(&self, edge: &ICFGEdge, out: &Self::Fact) -> Self::Fact;

    fn transfer_call_to_return_edge(&self, edge: &ICFGEdge, out: &Self::Fact) -> Self::Fact;

    fn transfer_call_edge(&self, edge: &ICFGEdge, call_site_out: &Self::Fact) -> Self::Fact;

    fn transfer_return_edge(&self, edge: &ICFGEdge, return_out: &Self::Fact) -> Self::Fact;

    fn transfer_node(
        &self,
        stmt: &Stmt,
        in_fact: &Self::Fact,
        out_fact: &mut Self::Fact,
        ctx: &mut InterContext<'_, Self::Fact>,
    ) -> Result<bool> {
        if stmt.is_invoke() {
            self.transfer_call_node(stmt, in_fact, out_fact)
        } else {
            self.transfer_non_call_node(stmt, in_fact, out_fact, ctx)
        }
    }

    fn transfer_edge(&self, edge: &ICFGEdge, out: &Self::Fact) -> Self::Fact {
        match edge.kind {
            ICFGEdgeKind::Normal => self.transfer_normal_edge(edge, out),
            ICFGEdgeKind::CallToReturn => self.transfer_call_to_return_edge(edge, out),
            ICFGEdgeKind::Call { .. } => self.transfer_call_edge(edge, out),
            ICFGEdgeKind::Return { .. } => self.transfer_return_edge(edge, out),
        }
    }
}
