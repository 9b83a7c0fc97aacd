//! Stage-specific configurations
//!
//! One config struct per analysis stage. Each has preset defaults,
//! validation and builder-style setters.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

/// Largest context depth accepted for k-limited strategies
pub const MAX_CONTEXT_DEPTH: usize = 4;

// ============================================================================
// Intraprocedural solver
// ============================================================================

/// Fixpoint algorithm for intraprocedural analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Worklist propagation (default)
    WorkList,
    /// Full sweeps until nothing changes; comparison baseline only
    Iterative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub kind: SolverKind,
}

impl SolverConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            kind: SolverKind::WorkList,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    /// Builder: Set kind
    pub fn kind(mut self, v: SolverKind) -> Self {
        self.kind = v;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Pointer analysis
// ============================================================================

/// Context sensitivity strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextStrategy {
    /// Context-insensitive (baseline)
    Insensitive,

    /// k-limiting call-string sensitivity (k-CFA)
    CallSite { k: usize },

    /// k-object sensitivity: contexts are receiver allocation sites
    Object { k: usize },

    /// k-type sensitivity: contexts are classes containing receiver allocation sites
    Type { k: usize },
}

impl ContextStrategy {
    /// Context depth (0 when insensitive)
    pub fn depth(&self) -> usize {
        match self {
            Self::Insensitive => 0,
            Self::CallSite { k } | Self::Object { k } | Self::Type { k } => *k,
        }
    }

    /// Short name, e.g. `2-obj`
    pub fn describe(&self) -> String {
        match self {
            Self::Insensitive => "ci".to_string(),
            Self::CallSite { k } => format!("{}-call", k),
            Self::Object { k } => format!("{}-obj", k),
            Self::Type { k } => format!("{}-type", k),
        }
    }
}

impl Default for ContextStrategy {
    fn default() -> Self {
        ContextStrategy::Object { k: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PTAConfig {
    /// Context abstraction
    pub context: ContextStrategy,
}

impl PTAConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let context = match preset {
            Preset::Fast => ContextStrategy::Insensitive,
            Preset::Balanced => ContextStrategy::Object { k: 1 },
            Preset::Precise => ContextStrategy::Object { k: 2 },
        };
        Self { context }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let k = self.context.depth();
        if self.context != ContextStrategy::Insensitive && !(1..=MAX_CONTEXT_DEPTH).contains(&k) {
            return Err(ConfigError::range_with_hint(
                "pta.context.k",
                k,
                1,
                MAX_CONTEXT_DEPTH,
                "Context depth must be positive; deep contexts rarely pay off",
            ));
        }
        Ok(())
    }

    /// Builder: Set context
    pub fn context(mut self, v: ContextStrategy) -> Self {
        self.context = v;
        self
    }
}

impl Default for PTAConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Inter-procedural constant propagation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterConstPropConfig {
    pub enabled: bool,

    /// Resolve heap loads through may-aliasing stores (needs PTA results)
    pub alias_aware: bool,
}

impl InterConstPropConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            enabled: true,
            alias_aware: preset != Preset::Fast,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.alias_aware && !self.enabled {
            return Err(ConfigError::CrossStageConflict {
                issue: "inter_constprop.alias_aware is set but the stage is disabled".to_string(),
                fix: "enable inter_constprop or unset alias_aware".to_string(),
            });
        }
        Ok(())
    }

    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Builder: Set alias_aware
    pub fn alias_aware(mut self, v: bool) -> Self {
        self.alias_aware = v;
        self
    }
}

impl Default for InterConstPropConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Dead code detection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadCodeConfig {
    pub enabled: bool,
}

impl DeadCodeConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self { enabled: true }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }
}

impl Default for DeadCodeConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
