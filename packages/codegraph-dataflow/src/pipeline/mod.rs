//! Whole-program analysis pipeline
//!
//! [`AnalysisPipeline`] runs every analysis in dependency order and leaves
//! the results in an [`AnalysisSession`].

pub mod orchestrator;
pub mod result;
pub mod session;

pub use orchestrator::AnalysisPipeline;
pub use result::PipelineSummary;
pub use session::{AnalysisId, AnalysisSession};
