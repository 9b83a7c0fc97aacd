/*
 * Codegraph Dataflow - Whole-Program Static Analysis Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Program model (classes, methods, vars, stmts)
 * - features/    : Vertical slices (flow_graph → data_flow → points_to → interprocedural)
 * - pipeline/    : Orchestration and the analysis session
 * - config/      : Presets, stage configs, YAML loading
 *
 * Analyses:
 * - Worklist dataflow solver (forward and backward)
 * - Constant propagation, live variables, dead code detection
 * - Context-sensitive pointer analysis with on-the-fly call graph
 * - Interprocedural constant propagation over the ICFG
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Analysis entry points take whole-program inputs
#![allow(clippy::type_complexity)] // Nested fact maps
#![allow(clippy::upper_case_acronyms)] // CFG, ICFG, PFG naming
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::len_without_is_empty)] // Graph sizes
#![allow(clippy::collapsible_if)] // Readability over brevity

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared program model
pub mod shared;

/// Feature modules (vertical slices)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system (presets, stage configs, YAML)
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ContextStrategy, PipelineConfig, Preset, SolverKind};
pub use errors::{AnalysisError, Result};
pub use features::data_flow::{
    ConstantPropagation, CpFact, DataflowAnalysis, DataflowResult, DataflowSolver, DeadCodeDetection,
    DeadCodeReport, LiveVariableAnalysis, LiveVars, Value,
};
pub use features::flow_graph::{CFGBuilder, ICFGBuilder, CFG, ICFG};
pub use features::interprocedural::{InterConstantPropagation, InterDataflowAnalysis, InterSolver};
pub use features::points_to::{PointerAnalysis, PointerAnalysisResult};
pub use pipeline::{AnalysisId, AnalysisPipeline, AnalysisSession, PipelineSummary};
pub use shared::models::{Program, ProgramBuilder};
