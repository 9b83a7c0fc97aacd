//! Pipeline orchestrator
//!
//! Runs the analyses of one whole program in dependency order and
//! publishes each result into an [`AnalysisSession`]:
//!
//! ```text
//! pointer analysis ──▶ per method: CFG, constant propagation, liveness, dead code
//!        │
//!        └──call edges──▶ ICFG ──▶ interprocedural constant propagation
//! ```

use super::result::PipelineSummary;
use super::session::{AnalysisId, AnalysisSession};
use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::features::data_flow::{
    ConstantPropagation, DataflowSolver, DeadCodeDetection, LiveVariableAnalysis,
};
use crate::features::flow_graph::{CFGBuilder, ICFGBuilder};
use crate::features::interprocedural::{InterConstantPropagation, InterSolver};
use crate::features::points_to::{PointerAnalysis, PointerAnalysisResult};
use crate::shared::models::Program;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct AnalysisPipeline {
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, program: Arc<Program>) -> Result<AnalysisSession> {
        self.run_with_summary(program).map(|(session, _)| session)
    }

    pub fn run_with_summary(&self, program: Arc<Program>) -> Result<(AnalysisSession, PipelineSummary)> {
        let start = Instant::now();
        self.config.validate()?;
        info!(config = %self.config.describe(), "analysis pipeline starting");

        let mut session = AnalysisSession::new(program.clone());
        let mut summary = PipelineSummary {
            preset: self.config.get_preset(),
            ..PipelineSummary::default()
        };

        // Stage 1: pointer analysis and call graph
        let pta = PointerAnalysis::new(self.config.pta.clone()).run(&program)?;
        summary.context = pta.selector().to_string();
        summary.call_edges = pta.stats().call_edges;
        let pta = session.publish(AnalysisId::PointerAnalysis, pta)?;
        let reachable = pta.reachable_methods();
        summary.reachable_methods = reachable.len();
        info!(
            reachable_methods = summary.reachable_methods,
            call_edges = summary.call_edges,
            "stage 1: pointer analysis done"
        );

        // Stage 2: intraprocedural analyses of reachable methods
        let solver = self.config.solver.kind;
        let cp = ConstantPropagation::new(&program);
        let dead_code = DeadCodeDetection::new(&program).with_solver(solver);
        for &method in &reachable {
            if program.method(method).is_abstract {
                continue;
            }
            let cfg = CFGBuilder::build(&program, method)?;
            let constants = DataflowSolver::new(&cp, &program).with_kind(solver).solve(&cfg)?;
            let live = DataflowSolver::new(&LiveVariableAnalysis, &program)
                .with_kind(solver)
                .solve(&cfg)?;

            if self.config.dead_code.enabled {
                let report = dead_code.detect(&cfg, &constants, &live);
                summary.dead_statements += report.dead.len();
                session.publish(AnalysisId::DeadCode(method), report)?;
            }
            session.publish(AnalysisId::Cfg(method), cfg)?;
            session.publish(AnalysisId::ConstantPropagation(method), constants)?;
            session.publish(AnalysisId::LiveVariables(method), live)?;
            summary.methods_analyzed += 1;
            debug!(method = %program.method(method).name, "intraprocedural analyses done");
        }
        info!(
            methods = summary.methods_analyzed,
            dead_statements = summary.dead_statements,
            "stage 2: intraprocedural analyses done"
        );

        // Stage 3: ICFG over the discovered call graph
        let entries = pta.entry_methods();
        let icfg = ICFGBuilder::build(&program, &entries, pta.ci_call_edges())?;
        summary.icfg_nodes = icfg.nodes().len();
        summary.icfg_edges = icfg.num_edges();
        let icfg = session.publish(AnalysisId::Icfg, icfg)?;
        info!(nodes = summary.icfg_nodes, edges = summary.icfg_edges, "stage 3: ICFG built");

        // Stage 4: interprocedural constant propagation
        if self.config.inter_constprop.enabled {
            let points_to = session.get::<PointerAnalysisResult>(AnalysisId::PointerAnalysis);
            let analysis = InterConstantPropagation::from_config(
                &program,
                &icfg,
                &self.config.inter_constprop,
                points_to.as_deref(),
            )?;
            let facts = InterSolver::new(&analysis, &program, &icfg).solve()?;
            summary.inter_constprop = true;
            summary.alias_aware = analysis.is_alias_aware();
            session.publish(AnalysisId::InterConstantPropagation, facts)?;
            info!(alias_aware = summary.alias_aware, "stage 4: interprocedural constant propagation done");
        }

        summary.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            published = session.len(),
            duration_ms = summary.duration_ms,
            "analysis pipeline finished"
        );
        Ok((session, summary))
    }
}
