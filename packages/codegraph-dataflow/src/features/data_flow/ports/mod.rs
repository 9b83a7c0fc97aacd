//! Ports (Interfaces) for intraprocedural dataflow analysis
//!
//! An analysis plugs into the generic solver by describing its lattice
//! (boundary fact, initial fact, meet) and its node transfer function.

use crate::errors::Result;
use crate::features::flow_graph::CFG;
use crate::shared::models::Stmt;
use std::fmt::Debug;

/// A monotone dataflow problem over one CFG
///
/// # Contract
/// - `meet_into` is commutative, associative and idempotent
/// - `transfer_node` is monotone and reports whether the fact it writes
///   (OUT for forward, IN for backward analyses) changed
pub trait DataflowAnalysis {
    type Fact: Clone + PartialEq + Debug;

    /// Name used in diagnostics and errors
    fn name(&self) -> &'static str;

    fn is_forward(&self) -> bool;

    /// Fact at the entry (forward) or exit (backward) of `cfg`
    fn new_boundary_fact(&self, cfg: &CFG) -> Self::Fact;

    /// Fact every other node starts from
    fn new_initial_fact(&self) -> Self::Fact;

    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// Apply the node transfer function.
    ///
    /// Forward analyses read `in_fact` and update `out_fact`; backward
    /// analyses read `out_fact` and update `in_fact`.
    fn transfer_node(
        &self,
        stmt: &Stmt,
        in_fact: &mut Self::Fact,
        out_fact: &mut Self::Fact,
    ) -> Result<bool>;
}
