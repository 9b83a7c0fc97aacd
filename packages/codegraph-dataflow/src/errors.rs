//! Error types for codegraph-dataflow
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::pipeline::session::AnalysisId;
use crate::shared::models::StmtId;
use thiserror::Error;

/// Main error type for analysis runs
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A statement or expression kind the running analysis cannot model.
    /// Reported instead of approximated, since approximating would be unsound.
    #[error("{analysis}: unsupported construct '{construct}' at {stmt}")]
    UnsupportedConstruct {
        analysis: &'static str,
        stmt: StmtId,
        construct: String,
    },

    /// An analysis was requested before a result it depends on exists
    #[error("{analysis} requires {requirement}")]
    MissingPrecondition {
        analysis: &'static str,
        requirement: String,
    },

    /// Requested direction/mode not supported by a solver
    #[error("{solver} does not support {mode}")]
    UnsupportedMode {
        solver: &'static str,
        mode: &'static str,
    },

    /// Malformed program model
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    /// Session results are write-once
    #[error("Result for {0} already published")]
    ResultAlreadyPublished(AnalysisId),

    /// Session lookup for a result that was never published
    #[error("No result published for {0}")]
    MissingResult(AnalysisId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    pub fn unsupported(analysis: &'static str, stmt: StmtId, construct: impl Into<String>) -> Self {
        AnalysisError::UnsupportedConstruct {
            analysis,
            stmt,
            construct: construct.into(),
        }
    }

    pub fn missing_precondition(analysis: &'static str, requirement: impl Into<String>) -> Self {
        AnalysisError::MissingPrecondition {
            analysis,
            requirement: requirement.into(),
        }
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
