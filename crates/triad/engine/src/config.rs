use serde::{Deserialize, Serialize};
use triad_classifier::{InfluenceProfile, ResolverConfig, StressLexicon};
use triad_evaluation::EvaluationConfig;
use triad_types::{SelectionMode, TriadError};

/// Everything tunable about an analysis run.
///
/// Missing sections in JSON take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub selection_mode: SelectionMode,
    pub resolver: ResolverConfig,
    /// Core's pull on Derived1, with expressive-group amplification.
    pub derived1_influence: InfluenceProfile,
    /// Core's pull on Derived2, linear only.
    pub derived2_influence: InfluenceProfile,
    pub stress: StressLexicon,
    pub evaluation: EvaluationConfig,
    /// Cached analyses kept; 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::HarmonyBalanced,
            resolver: ResolverConfig::default(),
            derived1_influence: InfluenceProfile::derived1(),
            derived2_influence: InfluenceProfile::derived2(),
            stress: StressLexicon::default(),
            evaluation: EvaluationConfig::default(),
            cache_capacity: 128,
        }
    }
}

impl EngineConfig {
    /// Plain top-two selection everywhere.
    pub fn legacy() -> Self {
        Self {
            selection_mode: SelectionMode::Legacy,
            ..Self::default()
        }
    }

    /// Raised evaluation thresholds, caching off.
    pub fn strict() -> Self {
        Self {
            evaluation: EvaluationConfig::strict(),
            cache_capacity: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TriadError> {
        self.resolver.validate()?;
        self.derived1_influence.validate()?;
        self.derived2_influence.validate()?;
        self.stress.validate()?;
        self.evaluation.validate()
    }

    /// Parse and validate.
    pub fn from_json_str(json: &str) -> Result<Self, TriadError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TriadError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, TriadError> {
        serde_json::to_string_pretty(self).map_err(|e| TriadError::InvalidConfig(e.to_string()))
    }
}
