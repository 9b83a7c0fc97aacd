//! Domain models for Points-to Analysis
//!
//! Core abstractions independent of the solver:
//! - Obj: allocation-site heap abstraction
//! - Context: k-limited calling context
//! - CsManager: interned context-sensitive elements and pointer nodes
//! - CsCallGraph: on-the-fly call graph
//! - PointsToSet: sorted id set

pub mod abstract_location;
pub mod call_graph;
pub mod context;
pub mod cs_element;
pub mod points_to_set;

pub use abstract_location::{Obj, ObjId};
pub use call_graph::{CallEdge, CsCallGraph};
pub use context::{Context, ContextElement};
pub use cs_element::{
    ContextId, CsCallSite, CsCallSiteId, CsManager, CsMethod, CsMethodId, CsObj, CsObjId, Pointer, PointerId,
};
pub use points_to_set::PointsToSet;
