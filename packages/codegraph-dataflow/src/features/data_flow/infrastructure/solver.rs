/*
 * Intraprocedural Fixpoint Solver
 *
 * Kildall-style dataflow framework, forward or backward.
 *
 * Algorithm (worklist):
 * 1. Boundary node (entry / exit) gets the boundary fact and is never
 *    transferred again; every other node starts at the initial fact
 * 2. Seed the worklist with all other nodes
 * 3. While worklist not empty:
 *    a. Pop node
 *    b. Meet: predecessors' OUT (forward) or successors' IN (backward)
 *    c. Transfer
 *    d. If changed: enqueue successors (forward) / predecessors (backward)
 * 4. Fixpoint reached when worklist empty
 *
 * The iterative variant sweeps every node until a full pass changes
 * nothing. Same fixpoint, more transfers; kept as a comparison mode.
 *
 * References:
 * - Kildall, G. (1973). "A Unified Approach to Global Program Optimization"
 * - Kam, J. & Ullman, J. (1977). "Monotone Data Flow Analysis Frameworks"
 */

use crate::config::SolverKind;
use crate::errors::{AnalysisError, Result};
use crate::features::data_flow::domain::DataflowResult;
use crate::features::data_flow::ports::DataflowAnalysis;
use crate::features::flow_graph::CFG;
use crate::shared::models::{Program, StmtId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Convergence statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Worklist pops (worklist) or full sweeps (iterative)
    pub iterations: usize,
    /// Transfer function applications
    pub transfers: usize,
    /// Transfers that changed a fact
    pub changes: usize,
}

/// Generic intraprocedural solver
pub struct DataflowSolver<'a, A: DataflowAnalysis> {
    analysis: &'a A,
    program: &'a Program,
    kind: SolverKind,
}

impl<'a, A: DataflowAnalysis> DataflowSolver<'a, A> {
    pub fn new(analysis: &'a A, program: &'a Program) -> Self {
        Self {
            analysis,
            program,
            kind: SolverKind::WorkList,
        }
    }

    pub fn with_kind(mut self, kind: SolverKind) -> Self {
        self.kind = kind;
        self
    }

    /// Solve and return the fixpoint
    pub fn solve(&self, cfg: &CFG) -> Result<DataflowResult<A::Fact>> {
        self.solve_with_stats(cfg).map(|(result, _)| result)
    }

    pub fn solve_with_stats(&self, cfg: &CFG) -> Result<(DataflowResult<A::Fact>, SolverStats)> {
        let mut result = self.initialize(cfg);
        let mut stats = SolverStats::default();
        match self.kind {
            SolverKind::WorkList => self.run_worklist(cfg, &mut result, &mut stats)?,
            SolverKind::Iterative => self.run_iterative(cfg, &mut result, &mut stats)?,
        }
        debug!(
            analysis = self.analysis.name(),
            method = %cfg.method(),
            solver = ?self.kind,
            iterations = stats.iterations,
            transfers = stats.transfers,
            "dataflow fixpoint reached"
        );
        Ok((result, stats))
    }

    /// Continue from facts that are already a fixpoint (or any facts at or
    /// below one). Used to check idempotence.
    pub fn resume(&self, cfg: &CFG, mut result: DataflowResult<A::Fact>) -> Result<DataflowResult<A::Fact>> {
        let mut stats = SolverStats::default();
        self.run_worklist(cfg, &mut result, &mut stats)?;
        Ok(result)
    }

    fn boundary_node(&self, cfg: &CFG) -> StmtId {
        if self.analysis.is_forward() {
            cfg.entry()
        } else {
            cfg.exit()
        }
    }

    /// Body order forward, reversed backward
    fn visit_order(cfg: &CFG, forward: bool) -> Vec<StmtId> {
        if forward {
            cfg.nodes().to_vec()
        } else {
            cfg.nodes().iter().rev().copied().collect()
        }
    }

    fn initialize(&self, cfg: &CFG) -> DataflowResult<A::Fact> {
        let mut result = DataflowResult::new();
        let boundary = self.boundary_node(cfg);
        for &node in cfg.nodes() {
            result.set_in_fact(node, self.analysis.new_initial_fact());
            result.set_out_fact(node, self.analysis.new_initial_fact());
        }
        let fact = self.analysis.new_boundary_fact(cfg);
        if self.analysis.is_forward() {
            result.set_out_fact(boundary, fact);
        } else {
            result.set_in_fact(boundary, fact);
        }
        result
    }

    /// Recompute the meet side of `node`, then transfer
    fn visit(&self, cfg: &CFG, node: StmtId, result: &mut DataflowResult<A::Fact>) -> Result<bool> {
        let mut merged = self.analysis.new_initial_fact();
        if self.analysis.is_forward() {
            for pred in cfg.preds(node) {
                if let Some(out) = result.out_fact(pred) {
                    self.analysis.meet_into(out, &mut merged);
                }
            }
            result.set_in_fact(node, merged);
        } else {
            for succ in cfg.succs(node) {
                if let Some(in_fact) = result.in_fact(succ) {
                    self.analysis.meet_into(in_fact, &mut merged);
                }
            }
            result.set_out_fact(node, merged);
        }

        let stmt = self.program.stmt(node);
        let (in_fact, out_fact) = result.facts_mut(node).ok_or_else(|| {
            AnalysisError::InvalidProgram(format!("{} is not a node of the CFG of {}", node, cfg.method()))
        })?;
        self.analysis.transfer_node(stmt, in_fact, out_fact)
    }

    fn run_worklist(
        &self,
        cfg: &CFG,
        result: &mut DataflowResult<A::Fact>,
        stats: &mut SolverStats,
    ) -> Result<()> {
        let boundary = self.boundary_node(cfg);
        let forward = self.analysis.is_forward();

        let mut worklist: VecDeque<StmtId> = VecDeque::with_capacity(cfg.len());
        let mut queued: FxHashSet<StmtId> = FxHashSet::default();
        for node in Self::visit_order(cfg, forward) {
            if node != boundary && queued.insert(node) {
                worklist.push_back(node);
            }
        }

        while let Some(node) = worklist.pop_front() {
            queued.remove(&node);
            stats.iterations += 1;
            stats.transfers += 1;

            if !self.visit(cfg, node, result)? {
                continue;
            }
            stats.changes += 1;
            trace!(node = %node, "fact changed");

            let next: Vec<StmtId> = if forward {
                cfg.succs(node).collect()
            } else {
                cfg.preds(node).collect()
            };
            for n in next {
                if n != boundary && queued.insert(n) {
                    worklist.push_back(n);
                }
            }
        }
        Ok(())
    }

    fn run_iterative(
        &self,
        cfg: &CFG,
        result: &mut DataflowResult<A::Fact>,
        stats: &mut SolverStats,
    ) -> Result<()> {
        let boundary = self.boundary_node(cfg);
        let order = Self::visit_order(cfg, self.analysis.is_forward());

        loop {
            stats.iterations += 1;
            let mut changed = false;
            for &node in &order {
                if node == boundary {
                    continue;
                }
                stats.transfers += 1;
                if self.visit(cfg, node, result)? {
                    stats.changes += 1;
                    changed = true;
                }
            }
            if !changed {
                return Ok(());
            }
        }
    }
}
