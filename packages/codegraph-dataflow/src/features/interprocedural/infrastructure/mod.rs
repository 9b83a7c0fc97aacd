pub mod alias;
pub mod inter_constant_propagation;
pub mod inter_solver;

pub use alias::{may_alias_indices, AliasIndex};
pub use inter_constant_propagation::{InterConstantPropagation, INTER_CONSTANT_PROPAGATION};
pub use inter_solver::InterSolver;
