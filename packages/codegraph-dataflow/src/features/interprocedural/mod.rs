//! Interprocedural dataflow analysis
//!
//! - `ports`: the [`InterDataflowAnalysis`] contract with per-edge transfers
//! - `infrastructure`: the ICFG worklist solver and interprocedural
//!   constant propagation, optionally resolving heap loads through
//!   pointer-analysis aliases
//!
//! ## Usage
//! ```text
//! let pta = PointerAnalysis::new(config.pta.clone()).run(&program)?;
//! let icfg = ICFGBuilder::build(&program, &[main], pta.ci_call_edges())?;
//! let cp = InterConstantPropagation::with_aliases(&program, &icfg, Some(&pta))?;
//! let facts = InterSolver::new(&cp, &program, &icfg).solve()?;
//! ```

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{AliasIndex, InterConstantPropagation, InterSolver, INTER_CONSTANT_PROPAGATION};
pub use ports::{InterContext, InterDataflowAnalysis};
