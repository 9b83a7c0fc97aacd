//! Application layer for Points-to Analysis
//!
//! - **PointerAnalysis**: configured entry point
//! - **PointerAnalysisResult**: context-sensitive and projected queries

pub mod analyzer;
pub mod result;

pub use analyzer::{PointerAnalysis, POINTER_ANALYSIS};
pub use result::{PointerAnalysisResult, ResolvedCallEdge};
