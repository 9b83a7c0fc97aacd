pub mod cfg;
pub mod icfg;

pub use cfg::{CFGEdge, CFGEdgeKind, CFG};
pub use icfg::{ICFGEdge, ICFGEdgeKind, ICFG};
