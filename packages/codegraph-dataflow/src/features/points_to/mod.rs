//! # Context-Sensitive Points-to Analysis
//!
//! Whole-program pointer analysis that builds the call graph on the fly:
//! - **Inclusion-based propagation** over a pointer flow graph, pushing only
//!   newly discovered objects (difference propagation)
//! - **Pluggable context sensitivity**: call-site, object and type
//!   sensitivity with k-limited contexts and (k-1)-limited heap contexts
//! - **Allocation-site heap abstraction**, field- and array-sensitive by
//!   base object (array elements are collapsed)
//!
//! ## Academic References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Milanova et al. "Parameterized Object Sensitivity" (TOSEM 2005)
//! - Smaragdakis et al. "Pick Your Contexts Well" (POPL 2011)
//!
//! ## Usage
//! ```text
//! let result = PointerAnalysis::new(PTAConfig::default()).run(&program)?;
//! for (call_site, callee) in result.ci_call_edges() { ... }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{PointerAnalysis, PointerAnalysisResult, ResolvedCallEdge, POINTER_ANALYSIS};
pub use domain::{
    CallEdge, Context, ContextElement, ContextId, CsCallGraph, CsManager, Obj, ObjId, Pointer, PointerId,
    PointsToSet,
};
pub use infrastructure::{PointerAnalysisSolver, PtaStats};
pub use ports::{ContextSelector, HeapModel};
