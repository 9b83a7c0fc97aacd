pub mod constant_propagation;
pub mod live_variable;
pub mod solver;

pub use constant_propagation::{evaluate, ConstantPropagation, CONSTANT_PROPAGATION};
pub use live_variable::{LiveVariableAnalysis, LiveVars, LIVE_VARIABLES};
pub use solver::{DataflowSolver, SolverStats};
