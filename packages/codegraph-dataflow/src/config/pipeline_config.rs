//! Pipeline configuration
//!
//! Level 1 is a preset, level 2 overrides a stage through a closure,
//! level 3 is a versioned YAML document.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::stage_configs::{DeadCodeConfig, InterConstPropConfig, PTAConfig, SolverConfig};
use serde::{Deserialize, Serialize};

/// Supported YAML schema versions
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Pipeline configuration (builder)
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Base preset
    pub(crate) preset: Preset,
    pub solver: SolverConfig,
    pub pta: PTAConfig,
    pub inter_constprop: InterConstPropConfig,
    pub dead_code: DeadCodeConfig,
}

/// On-disk form (v1)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFileV1 {
    version: Option<u32>,
    preset: String,
    #[serde(default)]
    overrides: Option<ConfigOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    solver: Option<SolverConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pta: Option<PTAConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inter_constprop: Option<InterConstPropConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dead_code: Option<DeadCodeConfig>,
}

impl PipelineConfig {
    /// Level 1: Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            solver: SolverConfig::from_preset(preset),
            pta: PTAConfig::from_preset(preset),
            inter_constprop: InterConstPropConfig::from_preset(preset),
            dead_code: DeadCodeConfig::from_preset(preset),
        }
    }

    /// Level 2: Override solver stage
    pub fn solver(mut self, f: impl FnOnce(SolverConfig) -> SolverConfig) -> Self {
        self.solver = f(self.solver);
        self
    }

    /// Level 2: Override pointer analysis stage
    pub fn pta(mut self, f: impl FnOnce(PTAConfig) -> PTAConfig) -> Self {
        self.pta = f(self.pta);
        self
    }

    /// Level 2: Override inter-procedural constant propagation stage
    pub fn inter_constprop(
        mut self,
        f: impl FnOnce(InterConstPropConfig) -> InterConstPropConfig,
    ) -> Self {
        self.inter_constprop = f(self.inter_constprop);
        self
    }

    /// Level 2: Override dead code stage
    pub fn dead_code(mut self, f: impl FnOnce(DeadCodeConfig) -> DeadCodeConfig) -> Self {
        self.dead_code = f(self.dead_code);
        self
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Validate every stage
    pub fn validate(&self) -> ConfigResult<()> {
        self.solver.validate()?;
        self.pta.validate()?;
        self.inter_constprop.validate()?;
        self.dead_code.validate()?;
        Ok(())
    }

    /// Level 3: Parse a v1 YAML document and validate it
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Same schema as YAML, JSON encoded
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFileV1) -> ConfigResult<Self> {
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&file.preset)
            .map_err(|_| ConfigError::UnknownPreset(file.preset.clone()))?;
        let mut config = Self::preset(preset);

        if let Some(overrides) = file.overrides {
            if let Some(solver) = overrides.solver {
                config.solver = solver;
            }
            if let Some(pta) = overrides.pta {
                config.pta = pta;
            }
            if let Some(icp) = overrides.inter_constprop {
                config.inter_constprop = icp;
            }
            if let Some(dead_code) = overrides.dead_code {
                config.dead_code = dead_code;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Export to YAML (every stage written as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                solver: Some(self.solver.clone()),
                pta: Some(self.pta.clone()),
                inter_constprop: Some(self.inter_constprop.clone()),
                dead_code: Some(self.dead_code.clone()),
            }),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }

    /// Human-readable one-line description
    pub fn describe(&self) -> String {
        format!(
            "preset={} solver={:?} pta={} inter_constprop={}{} dead_code={}",
            self.preset,
            self.solver.kind,
            self.pta.context.describe(),
            if self.inter_constprop.enabled { "on" } else { "off" },
            if self.inter_constprop.alias_aware { "+alias" } else { "" },
            if self.dead_code.enabled { "on" } else { "off" },
        )
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
