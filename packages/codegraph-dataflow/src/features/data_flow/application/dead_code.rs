//! Dead code detection
//!
//! Combines three results for one method:
//! - control reachability from the entry, pruning `if`/`switch` edges that
//!   constant propagation proves are never taken
//! - constant propagation IN facts (branch conditions)
//! - liveness OUT facts (useless assignments)
//!
//! A statement is dead when it is unreachable, or when it assigns a
//! variable that is not live afterwards and its right-hand side has no
//! side effect.

use crate::config::SolverKind;
use crate::errors::Result;
use crate::features::data_flow::domain::{CpFact, DataflowResult, Value};
use crate::features::data_flow::infrastructure::constant_propagation::{
    evaluate, ConstantPropagation,
};
use crate::features::data_flow::infrastructure::live_variable::{LiveVariableAnalysis, LiveVars};
use crate::features::data_flow::infrastructure::solver::DataflowSolver;
use crate::features::flow_graph::{CFGBuilder, CFGEdge, CFGEdgeKind, CFG};
use crate::shared::models::{MethodId, Program, StmtId, StmtKind};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Dead statements of one method, in body index order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadCodeReport {
    pub method: MethodId,
    pub dead: Vec<StmtId>,
    /// Statements never reached from the entry
    pub unreachable: usize,
    /// Reachable assignments whose result is never used
    pub useless: usize,
}

impl DeadCodeReport {
    pub fn contains(&self, stmt: StmtId) -> bool {
        self.dead.contains(&stmt)
    }

    /// Body indices of the dead statements
    pub fn indices(&self, program: &Program) -> Vec<usize> {
        self.dead.iter().map(|&s| program.stmt(s).index).collect()
    }
}

pub struct DeadCodeDetection<'a> {
    program: &'a Program,
    solver: SolverKind,
}

impl<'a> DeadCodeDetection<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            solver: SolverKind::WorkList,
        }
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Build the CFG, run constant propagation and liveness, then detect
    pub fn analyze_method(&self, method: MethodId) -> Result<DeadCodeReport> {
        let cfg = CFGBuilder::build(self.program, method)?;
        let cp = ConstantPropagation::new(self.program);
        let constants = DataflowSolver::new(&cp, self.program)
            .with_kind(self.solver)
            .solve(&cfg)?;
        let live = DataflowSolver::new(&LiveVariableAnalysis, self.program)
            .with_kind(self.solver)
            .solve(&cfg)?;
        Ok(self.detect(&cfg, &constants, &live))
    }

    /// Classify statements from precomputed facts
    pub fn detect(
        &self,
        cfg: &CFG,
        constants: &DataflowResult<CpFact>,
        live: &DataflowResult<LiveVars>,
    ) -> DeadCodeReport {
        let empty_cp = CpFact::new();
        let empty_live = LiveVars::new();

        let mut visited: FxHashSet<StmtId> = FxHashSet::default();
        let mut useless: FxHashSet<StmtId> = FxHashSet::default();
        let mut queue: VecDeque<StmtId> = VecDeque::new();
        visited.insert(cfg.entry());
        queue.push_back(cfg.entry());

        while let Some(node) = queue.pop_front() {
            let stmt = self.program.stmt(node);
            let in_fact = constants.in_fact(node).unwrap_or(&empty_cp);

            for edge in self.feasible_edges(cfg, node, in_fact) {
                if visited.insert(edge.target) {
                    queue.push_back(edge.target);
                }
            }

            if let Some(def) = stmt.effect_free_def() {
                let out_live = live.out_fact(node).unwrap_or(&empty_live);
                if !out_live.contains(&def) {
                    useless.insert(node);
                }
            }
        }

        let body = &self.program.method(cfg.method()).body;
        let mut unreachable = 0;
        let dead: Vec<StmtId> = body
            .iter()
            .copied()
            .filter(|s| {
                if !visited.contains(s) {
                    unreachable += 1;
                    true
                } else {
                    useless.contains(s)
                }
            })
            .collect();

        debug!(
            method = %cfg.method(),
            dead = dead.len(),
            unreachable,
            useless = useless.len(),
            "dead code detected"
        );

        DeadCodeReport {
            method: cfg.method(),
            dead,
            unreachable,
            useless: useless.len(),
        }
    }

    /// Out edges of `node` that may be taken under `in_fact`
    fn feasible_edges<'c>(&self, cfg: &'c CFG, node: StmtId, in_fact: &CpFact) -> Vec<&'c CFGEdge> {
        let edges = cfg.out_edges(node);
        match &self.program.stmt(node).kind {
            StmtKind::If { cond, .. } => match evaluate(cond, in_fact) {
                Value::Constant(c) => {
                    let taken = if c != 0 {
                        CFGEdgeKind::IfTrue
                    } else {
                        CFGEdgeKind::IfFalse
                    };
                    edges.iter().filter(|e| e.kind == taken).collect()
                }
                _ => edges.iter().collect(),
            },
            StmtKind::Switch { var, .. } => match in_fact.get(*var) {
                Value::Constant(c) => {
                    let matching: Vec<&CFGEdge> = edges
                        .iter()
                        .filter(|e| e.kind == CFGEdgeKind::SwitchCase(c))
                        .collect();
                    if matching.is_empty() {
                        edges
                            .iter()
                            .filter(|e| e.kind == CFGEdgeKind::SwitchDefault)
                            .collect()
                    } else {
                        matching
                    }
                }
                _ => edges.iter().collect(),
            },
            _ => edges.iter().collect(),
        }
    }
}
