use serde::{Deserialize, Serialize};
use triad_types::TriadError;

/// Score thresholds below which a recommendation fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub consistency: f64,
    pub balance: f64,
    pub integration: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            consistency: 70.0,
            balance: 65.0,
            integration: 75.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWeights {
    pub distance: f64,
    pub facet_compatibility: f64,
    pub alignment: f64,
}

impl Default for ConsistencyWeights {
    fn default() -> Self {
        Self {
            distance: 0.40,
            facet_compatibility: 0.35,
            alignment: 0.25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceWeights {
    pub distribution: f64,
    pub complementarity: f64,
    pub stability: f64,
    pub adaptability: f64,
}

impl Default for BalanceWeights {
    fn default() -> Self {
        Self {
            distribution: 0.30,
            complementarity: 0.25,
            stability: 0.25,
            adaptability: 0.20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegrationWeights {
    pub meaning: f64,
    pub levels: f64,
    pub symmetry: f64,
    pub synergy: f64,
}

impl Default for IntegrationWeights {
    fn default() -> Self {
        Self {
            meaning: 0.35,
            levels: 0.25,
            symmetry: 0.25,
            synergy: 0.15,
        }
    }
}

/// Evaluator tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub thresholds: Thresholds,
    /// Ideal share of aggregate intensity for Core, Derived1, Derived2.
    #[serde(default = "default_ideal_shares")]
    pub ideal_shares: [f64; 3],
    #[serde(default)]
    pub consistency_weights: ConsistencyWeights,
    #[serde(default)]
    pub balance_weights: BalanceWeights,
    #[serde(default)]
    pub integration_weights: IntegrationWeights,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_ideal_shares() -> [f64; 3] {
    [0.35, 0.35, 0.30]
}

impl EvaluationConfig {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
            ideal_shares: default_ideal_shares(),
            consistency_weights: ConsistencyWeights::default(),
            balance_weights: BalanceWeights::default(),
            integration_weights: IntegrationWeights::default(),
        }
    }

    /// Raised thresholds for reviews that should flag more.
    pub fn strict() -> Self {
        Self {
            thresholds: Thresholds {
                consistency: 80.0,
                balance: 75.0,
                integration: 85.0,
            },
            ..Self::new()
        }
    }

    pub fn validate(&self) -> Result<(), TriadError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("consistency", t.consistency),
            ("balance", t.balance),
            ("integration", t.integration),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(TriadError::InvalidConfig(format!(
                    "{} threshold {} outside [0, 100]",
                    name, value
                )));
            }
        }

        check_unit_sum("ideal_shares", &self.ideal_shares)?;
        let c = &self.consistency_weights;
        check_unit_sum(
            "consistency_weights",
            &[c.distance, c.facet_compatibility, c.alignment],
        )?;
        let b = &self.balance_weights;
        check_unit_sum(
            "balance_weights",
            &[b.distribution, b.complementarity, b.stability, b.adaptability],
        )?;
        let i = &self.integration_weights;
        check_unit_sum(
            "integration_weights",
            &[i.meaning, i.levels, i.symmetry, i.synergy],
        )
    }
}

fn check_unit_sum(name: &str, values: &[f64]) -> Result<(), TriadError> {
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(TriadError::InvalidConfig(format!(
            "{} must be finite and non-negative",
            name
        )));
    }
    let sum: f64 = values.iter().sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(TriadError::InvalidConfig(format!(
            "{} sum to {}, expected 1",
            name, sum
        )));
    }
    Ok(())
}
