//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Quick scan
    ///
    /// - PTA: context-insensitive
    /// - Inter-procedural constant propagation without heap aliasing
    Fast,

    /// Default
    ///
    /// - PTA: 1-object sensitivity
    /// - Alias-aware inter-procedural constant propagation
    Balanced,

    /// Most precise
    ///
    /// - PTA: 2-object sensitivity (1-object heap)
    /// - Alias-aware inter-procedural constant propagation
    Precise,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "precise" => Ok(Self::Precise),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: fast, balanced, precise",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Precise => "precise",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
