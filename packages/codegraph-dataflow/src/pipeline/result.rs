//! Pipeline result types

use crate::config::Preset;
use serde::{Deserialize, Serialize};

/// What one pipeline run did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub preset: Preset,
    /// Context selector of the pointer analysis (`ci`, `2-obj`, ...)
    pub context: String,
    pub reachable_methods: usize,
    pub call_edges: usize,
    /// Methods that got a CFG, constant propagation and liveness
    pub methods_analyzed: usize,
    pub dead_statements: usize,
    pub icfg_nodes: usize,
    pub icfg_edges: usize,
    pub inter_constprop: bool,
    pub alias_aware: bool,
    pub duration_ms: f64,
}
