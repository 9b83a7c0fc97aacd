pub mod cfg_builder;
pub mod icfg_builder;

pub use cfg_builder::CFGBuilder;
pub use icfg_builder::ICFGBuilder;
