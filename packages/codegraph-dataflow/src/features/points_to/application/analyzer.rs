//! High-Level Points-to Analyzer
//!
//! Validates the configuration, runs the context-sensitive solver from the
//! program's entry method and wraps the final state in a
//! [`PointerAnalysisResult`].
//!
//! # Usage
//! ```text
//! use codegraph_dataflow::config::{ContextStrategy, PTAConfig};
//! use codegraph_dataflow::features::points_to::PointerAnalysis;
//!
//! let config = PTAConfig::default().context(ContextStrategy::CallSite { k: 2 });
//! let result = PointerAnalysis::new(config).run(&program)?;
//! assert!(result.may_alias(x, y));
//! ```

use super::result::PointerAnalysisResult;
use crate::config::PTAConfig;
use crate::errors::Result;
use crate::features::points_to::infrastructure::cs_solver::PointerAnalysisSolver;
use crate::shared::models::Program;
use tracing::info;

pub use crate::features::points_to::infrastructure::cs_solver::POINTER_ANALYSIS;

#[derive(Debug, Clone, Default)]
pub struct PointerAnalysis {
    config: PTAConfig,
}

impl PointerAnalysis {
    pub fn new(config: PTAConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PTAConfig {
        &self.config
    }

    pub fn run(&self, program: &Program) -> Result<PointerAnalysisResult> {
        self.config.validate()?;

        let mut solver = PointerAnalysisSolver::new(program, self.config.context);
        solver.solve()?;
        let result = PointerAnalysisResult::new(solver.into_output());

        let stats = result.stats();
        info!(
            selector = result.selector(),
            reachable_methods = stats.reachable_methods,
            call_edges = stats.call_edges,
            pointers = stats.pointers,
            objects = stats.objects,
            contexts = stats.contexts,
            duration_ms = stats.duration_ms,
            "pointer analysis finished"
        );
        Ok(result)
    }
}
