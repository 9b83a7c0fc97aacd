//! Intraprocedural dataflow analysis
//!
//! - `domain`: constant propagation lattice, facts, IN/OUT results
//! - `ports`: the [`DataflowAnalysis`] contract
//! - `infrastructure`: the generic solver, constant propagation, liveness
//! - `application`: dead code detection built on both analyses
//!
//! ## Usage
//! ```text
//! let cfg = CFGBuilder::build(&program, method)?;
//! let cp = ConstantPropagation::new(&program);
//! let facts = DataflowSolver::new(&cp, &program).solve(&cfg)?;
//! let dead = DeadCodeDetection::new(&program).analyze_method(method)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{DeadCodeDetection, DeadCodeReport};
pub use domain::{CpFact, DataflowResult, SetFact, Value};
pub use infrastructure::{
    evaluate, ConstantPropagation, DataflowSolver, LiveVariableAnalysis, LiveVars, SolverStats,
};
pub use ports::DataflowAnalysis;
