//! Configuration System
//!
//! Three tiers:
//! - Level 1: Preset - Simple one-liner
//! - Level 2: Stage Override - Partial adjustment via closures
//! - Level 3: YAML - Complete control
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_dataflow::config::{ContextStrategy, PipelineConfig, Preset};
//!
//! let config = PipelineConfig::preset(Preset::Fast);
//!
//! let config = PipelineConfig::preset(Preset::Balanced)
//!     .pta(|c| c.context(ContextStrategy::CallSite { k: 2 }));
//!
//! let config = PipelineConfig::from_yaml("analysis.yaml")?;
//! ```

pub mod error;
pub mod pipeline_config;
pub mod preset;
pub mod stage_configs;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use pipeline_config::PipelineConfig;
pub use preset::Preset;
pub use stage_configs::{
    ContextStrategy, DeadCodeConfig, InterConstPropConfig, PTAConfig, SolverConfig, SolverKind,
    MAX_CONTEXT_DEPTH,
};
