/*
 * Interprocedural Worklist Solver
 *
 * Forward fixpoint over the ICFG.
 *
 * Algorithm:
 * 1. Every node starts at the initial fact; the entry node of each entry
 *    method gets the boundary fact as OUT and is never transferred
 * 2. Seed the worklist with all other nodes
 * 3. While worklist not empty:
 *    a. Pop node
 *    b. IN = meet over in-edges of transfer_edge(edge, OUT[source])
 *    c. Transfer node (the analysis may enqueue further nodes)
 *    d. If OUT changed: enqueue ICFG successors
 *
 * References:
 * - Sharir, M. & Pnueli, A. (1981). "Two Approaches to Interprocedural
 *   Data Flow Analysis"
 */

use crate::errors::{AnalysisError, Result};
use crate::features::data_flow::domain::DataflowResult;
use crate::features::data_flow::infrastructure::solver::SolverStats;
use crate::features::flow_graph::ICFG;
use crate::features::interprocedural::ports::{InterContext, InterDataflowAnalysis};
use crate::shared::models::{Program, StmtId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, trace};

pub struct InterSolver<'a, A: InterDataflowAnalysis> {
    analysis: &'a A,
    program: &'a Program,
    icfg: &'a ICFG,
}

impl<'a, A: InterDataflowAnalysis> InterSolver<'a, A> {
    pub fn new(analysis: &'a A, program: &'a Program, icfg: &'a ICFG) -> Self {
        Self {
            analysis,
            program,
            icfg,
        }
    }

    pub fn solve(&self) -> Result<DataflowResult<A::Fact>> {
        self.solve_with_stats().map(|(result, _)| result)
    }

    pub fn solve_with_stats(&self) -> Result<(DataflowResult<A::Fact>, SolverStats)> {
        if !self.analysis.is_forward() {
            return Err(AnalysisError::UnsupportedMode {
                solver: "interprocedural",
                mode: "backward",
            });
        }

        let (mut result, boundary) = self.initialize();
        let mut stats = SolverStats::default();

        let mut worklist: VecDeque<StmtId> = VecDeque::with_capacity(self.icfg.nodes().len());
        let mut queued: FxHashSet<StmtId> = FxHashSet::default();
        for &node in self.icfg.nodes() {
            if !boundary.contains(&node) && queued.insert(node) {
                worklist.push_back(node);
            }
        }

        while let Some(node) = worklist.pop_front() {
            queued.remove(&node);
            stats.iterations += 1;
            stats.transfers += 1;

            let (changed, pending) = self.visit(node, &mut result)?;
            let next: Vec<StmtId> = if changed {
                stats.changes += 1;
                trace!(node = %node, "fact changed");
                self.icfg.succs(node).chain(pending).collect()
            } else {
                pending
            };
            for n in next {
                if !boundary.contains(&n) && queued.insert(n) {
                    worklist.push_back(n);
                }
            }
        }

        debug!(
            analysis = self.analysis.name(),
            nodes = self.icfg.nodes().len(),
            iterations = stats.iterations,
            changes = stats.changes,
            "interprocedural fixpoint reached"
        );
        Ok((result, stats))
    }

    fn initialize(&self) -> (DataflowResult<A::Fact>, FxHashSet<StmtId>) {
        let mut result = DataflowResult::new();
        for &node in self.icfg.nodes() {
            result.set_in_fact(node, self.analysis.new_initial_fact());
            result.set_out_fact(node, self.analysis.new_initial_fact());
        }

        let mut boundary = FxHashSet::default();
        for &method in self.icfg.entry_methods() {
            if let Some(entry) = self.icfg.entry_of(method) {
                result.set_out_fact(entry, self.analysis.new_boundary_fact(method));
                boundary.insert(entry);
            }
        }
        (result, boundary)
    }

    /// Recompute IN of `node` from its in-edges, then transfer
    fn visit(&self, node: StmtId, result: &mut DataflowResult<A::Fact>) -> Result<(bool, Vec<StmtId>)> {
        let mut in_fact = self.analysis.new_initial_fact();
        for edge in self.icfg.in_edges(node) {
            if let Some(out) = result.out_fact(edge.source) {
                let flowed = self.analysis.transfer_edge(edge, out);
                self.analysis.meet_into(&flowed, &mut in_fact);
            }
        }
        result.set_in_fact(node, in_fact.clone());

        let mut out_fact = match result.out_fact(node) {
            Some(out) => out.clone(),
            None => self.analysis.new_initial_fact(),
        };
        let stmt = self.program.stmt(node);
        let mut ctx = InterContext::new(result);
        let changed = self.analysis.transfer_node(stmt, &in_fact, &mut out_fact, &mut ctx)?;
        let pending = ctx.into_pending();
        result.set_out_fact(node, out_fact);
        Ok((changed, pending))
    }
}
