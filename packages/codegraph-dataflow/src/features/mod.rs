//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure analysis data (facts, lattices, graphs)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Solvers and builders

pub mod data_flow;
pub mod flow_graph;

// Whole-program analyses on top of the call graph
pub mod interprocedural;
pub mod points_to;
