//! Infrastructure layer for Points-to Analysis
//!
//! - **PointerAnalysisSolver**: context-sensitive inclusion-based solver
//! - **PointerFlowGraph**: subset edges between pointers (petgraph)
//! - **Context selectors**: insensitive, k-call-site, k-object, k-type
//! - **AllocationSiteHeapModel**: one abstract object per allocation site

pub mod context_selector;
pub mod cs_solver;
pub mod heap_model;
pub mod pointer_flow_graph;

pub use context_selector::{
    make_selector, CallSiteSelector, InsensitiveSelector, ObjectSelector, TypeSelector,
};
pub use cs_solver::{PointerAnalysisSolver, PtaStats, SolverOutput};
pub use heap_model::AllocationSiteHeapModel;
pub use pointer_flow_graph::PointerFlowGraph;
