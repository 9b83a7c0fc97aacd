//! Control flow graphs
//!
//! Statement-level CFGs per method and the interprocedural CFG linking them
//! at call sites. Both are read-only inputs to the dataflow solvers.

pub mod domain;
pub mod infrastructure;

pub use domain::{CFGEdge, CFGEdgeKind, ICFGEdge, ICFGEdgeKind, CFG, ICFG};
pub use infrastructure::{CFGBuilder, ICFGBuilder};
